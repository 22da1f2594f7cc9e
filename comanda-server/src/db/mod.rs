//! Database Module
//!
//! Embedded SurrealDB storage. Production runs on the RocksDB backend under
//! `work_dir/database/`; tests use the in-memory engine through the same
//! `Surreal<Db>` handle.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "comanda";
const DATABASE: &str = "main";

/// Database service: owns the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %db_path, "Database connection established (RocksDB)");
        Ok(Self { db })
    }

    /// Open an in-memory database (tests, demos)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::SettingsRepository;

    #[tokio::test]
    async fn test_on_disk_database_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comanda.db");

        let service = DbService::new(&path.to_string_lossy()).await.unwrap();
        let repo = SettingsRepository::new(service.db.clone());

        let created = repo.get_or_create().await.unwrap();
        assert!(created.enable_delivery);

        let read_back = repo.get().await.unwrap();
        assert!(read_back.is_some());
        assert!(path.exists());
    }
}
