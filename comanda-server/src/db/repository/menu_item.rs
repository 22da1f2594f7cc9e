//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use rust_decimal::Decimal;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "menu_item";
const SECTION_TABLE: &str = "section";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all items ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(item)
    }

    /// Find item by code within a section
    pub async fn find_by_code(
        &self,
        section: &RecordId,
        code: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let code_owned = code.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE section = $section AND code = $code LIMIT 1")
            .bind(("section", section.clone()))
            .bind(("code", code_owned))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                data.price
            )));
        }

        let section = record_id(SECTION_TABLE, &data.section);
        let existing: Option<crate::db::models::Section> =
            self.base.db().select(section.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!(
                "Section {} not found",
                data.section
            )));
        }

        // Code must be unique within the section
        if self.find_by_code(&section, &data.code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Item code '{}' already exists in this section",
                data.code
            )));
        }

        let item = MenuItem {
            id: None,
            code: data.code,
            name: data.name,
            price: data.price,
            description: data.description,
            is_available: data.is_available.unwrap_or(true),
            section,
            sort_order: data.sort_order.unwrap_or(0),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Update a menu item
    ///
    /// Price changes take effect immediately for all future reconciliations;
    /// historical orders keep their snapshot.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation(format!(
                "Price must be non-negative, got {}",
                price
            )));
        }

        if let Some(ref new_code) = data.code
            && new_code != &existing.code
            && self
                .find_by_code(&existing.section, new_code)
                .await?
                .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Item code '{}' already exists in this section",
                new_code
            )));
        }

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid))
            .bind(("data", data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    /// Hard delete a menu item
    ///
    /// Safe at any time: orders carry denormalized snapshots, never live
    /// references.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Menu item {} not found", id)));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", record_id(TABLE, id)))
            .await?;

        Ok(true)
    }
}
