//! Settings service: process-wide singleton configuration
//!
//! Read by every pricing computation, so reads come from an in-process cache
//! rather than the database. Updates persist first, then swap the whole
//! cached record under the write lock: a concurrent reader sees the old or
//! the new settings, never a half-applied mix. Writes affect subsequent
//! orders only; historical orders keep their snapshotted totals.

use crate::db::models::{Settings, SettingsUpdate};
use crate::db::repository::{RepoResult, SettingsRepository};
use parking_lot::RwLock;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub struct SettingsService {
    repo: SettingsRepository,
    cache: RwLock<Settings>,
}

impl SettingsService {
    /// Load settings from storage, creating defaults on first run
    pub async fn load(db: Surreal<Db>) -> RepoResult<Self> {
        let repo = SettingsRepository::new(db);
        let settings = repo.get_or_create().await?;
        tracing::info!(
            tax_percentage = %settings.tax_percentage,
            enable_delivery = settings.enable_delivery,
            "Settings loaded"
        );
        Ok(Self {
            repo,
            cache: RwLock::new(settings),
        })
    }

    /// Current settings snapshot
    pub fn get(&self) -> Settings {
        self.cache.read().clone()
    }

    /// Merge a partial update, persist it, and swap the cache
    pub async fn update(&self, data: SettingsUpdate) -> RepoResult<Settings> {
        let updated = self.repo.update(data).await?;
        *self.cache.write() = updated.clone();
        tracing::info!("Settings updated");
        Ok(updated)
    }
}
