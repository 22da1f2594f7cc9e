//! Repository Module
//!
//! CRUD operations over the embedded database, one repository per table.

pub mod menu_item;
pub mod order;
pub mod section;
pub mod settings;

// Re-exports
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use section::SectionRepository;
pub use settings::SettingsRepository;

use crate::utils::AppError;
use shared::ErrorCode;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cycle: {0}")]
    Cycle(String),

    #[error("In use: {0}")]
    InUse(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Cycle(msg) => AppError::domain(ErrorCode::SectionCycle, msg),
            RepoError::InUse(msg) => AppError::domain(ErrorCode::SectionInUse, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// ID convention: the whole stack uses plain record keys in URLs and
// payloads; `record_id` tolerates a "table:key" prefix so both forms work.

/// Build a `RecordId`, stripping a `table:` prefix if present
pub fn record_id(table: &str, id: &str) -> RecordId {
    let key = id
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id);
    RecordId::from_table_key(table, key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_both_forms() {
        let plain = record_id("section", "starters");
        let prefixed = record_id("section", "section:starters");
        assert_eq!(plain, prefixed);
        assert_eq!(plain.key().to_string(), "starters");
    }
}
