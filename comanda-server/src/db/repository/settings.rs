//! Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Settings, SettingsUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "settings";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct SettingsRepository {
    base: BaseRepository,
}

impl SettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings record
    ///
    /// First read performs an implicit create-default so the system never
    /// operates with an undefined configuration.
    pub async fn get_or_create(&self) -> RepoResult<Settings> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        let now = shared::util::now_millis();
        let settings = Settings {
            created_at: Some(now),
            updated_at: Some(now),
            ..Settings::default()
        };

        let created: Option<Settings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create settings".to_string()))
    }

    /// Get the singleton settings record
    pub async fn get(&self) -> RepoResult<Option<Settings>> {
        let settings: Option<Settings> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Merge a partial update into the singleton
    pub async fn update(&self, data: SettingsUpdate) -> RepoResult<Settings> {
        // Ensure the singleton exists
        self.get_or_create().await?;

        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let updated: Option<Settings> = self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update settings".to_string()))
    }
}
