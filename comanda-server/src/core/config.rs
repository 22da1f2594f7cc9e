//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/comanda | working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | LOG_LEVEL | info | tracing level |
//! | ENVIRONMENT | development | development \| staging \| production |
//!
//! # Example
//!
//! ```ignore
//! WORK_DIR=/data/comanda HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level string passed to the tracing subscriber
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/comanda".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work_dir and port, used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
