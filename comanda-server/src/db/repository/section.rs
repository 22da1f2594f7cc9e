//! Section Repository
//!
//! The catalog tree is an arena: sections reference their parent by record
//! link. Re-parenting walks the ancestor chain to keep the relation a tree.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Section, SectionCreate, SectionUpdate};
use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "section";

/// Walking more ancestors than this means the parent chain is corrupt
const MAX_ANCESTOR_DEPTH: usize = 64;

#[derive(Clone)]
pub struct SectionRepository {
    base: BaseRepository,
}

impl SectionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all sections ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<Section>> {
        let sections: Vec<Section> = self
            .base
            .db()
            .query("SELECT * FROM section ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(sections)
    }

    /// Find section by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Section>> {
        let section: Option<Section> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(section)
    }

    /// Find section by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Section>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM section WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let sections: Vec<Section> = result.take(0)?;
        Ok(sections.into_iter().next())
    }

    /// Create a new section
    pub async fn create(&self, data: SectionCreate) -> RepoResult<Section> {
        // Slug must be unique across the whole catalog
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Section '{}' already exists",
                data.slug
            )));
        }

        let parent = match data.parent.as_deref() {
            Some(parent_id) => {
                let parent_rid = record_id(TABLE, parent_id);
                if self.find_by_id(parent_id).await?.is_none() {
                    return Err(RepoError::NotFound(format!(
                        "Parent section {} not found",
                        parent_id
                    )));
                }
                Some(parent_rid)
            }
            None => None,
        };

        let section = Section {
            id: None,
            slug: data.slug,
            title: data.title,
            description: data.description,
            image_ref: data.image_ref,
            parent,
            sort_order: data.sort_order.unwrap_or(0),
        };

        let created: Option<Section> = self.base.db().create(TABLE).content(section).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create section".to_string()))
    }

    /// Update a section
    ///
    /// Re-parenting is validated against the ancestor chain: a section may
    /// never become its own ancestor.
    pub async fn update(&self, id: &str, data: SectionUpdate) -> RepoResult<Section> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Section {} not found", id)))?;

        // Check duplicate slug if changing
        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Section '{}' already exists",
                new_slug
            )));
        }

        let new_parent = match data.parent.as_deref() {
            Some(parent_id) => {
                let parent_rid = record_id(TABLE, parent_id);
                if self.find_by_id(parent_id).await?.is_none() {
                    return Err(RepoError::NotFound(format!(
                        "Parent section {} not found",
                        parent_id
                    )));
                }
                self.ensure_not_ancestor(&record_id(TABLE, id), &parent_rid)
                    .await?;
                Some(parent_rid)
            }
            None => None,
        };

        #[derive(Serialize)]
        struct SectionUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image_ref: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            parent: Option<RecordId>,
            #[serde(skip_serializing_if = "Option::is_none")]
            sort_order: Option<i32>,
        }

        let update_data = SectionUpdateDb {
            slug: data.slug,
            title: data.title,
            description: data.description,
            image_ref: data.image_ref,
            parent: new_parent,
            sort_order: data.sort_order,
        };

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid.clone()))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Section {} not found", id)))
    }

    /// Hard delete a section
    ///
    /// Rejected while child sections or menu items still reference it.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id);

        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Section {} not found", id)));
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM section WHERE parent = $section GROUP ALL")
            .bind(("section", rid.clone()))
            .await?;
        let child_count: Option<i64> = result.take((0, "count"))?;
        if child_count.unwrap_or(0) > 0 {
            return Err(RepoError::InUse(format!(
                "Section {} still has child sections",
                id
            )));
        }

        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM menu_item WHERE section = $section GROUP ALL")
            .bind(("section", rid.clone()))
            .await?;
        let item_count: Option<i64> = result.take((0, "count"))?;
        if item_count.unwrap_or(0) > 0 {
            return Err(RepoError::InUse(format!(
                "Section {} still has menu items",
                id
            )));
        }

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;

        Ok(true)
    }

    /// Reject a re-parent that would make `section` its own ancestor
    async fn ensure_not_ancestor(
        &self,
        section: &RecordId,
        new_parent: &RecordId,
    ) -> RepoResult<()> {
        if section == new_parent {
            return Err(RepoError::Cycle(format!(
                "Section {} cannot be its own parent",
                section.key()
            )));
        }

        let mut cursor = Some(new_parent.clone());
        let mut depth = 0;
        while let Some(current) = cursor {
            if depth > MAX_ANCESTOR_DEPTH {
                return Err(RepoError::Cycle(
                    "Ancestor chain exceeds maximum depth".to_string(),
                ));
            }
            depth += 1;

            let node: Option<Section> = self.base.db().select(current).await?;
            match node {
                Some(node) => {
                    if node.id.as_ref() == Some(section) {
                        return Err(RepoError::Cycle(format!(
                            "Section {} would become its own ancestor",
                            section.key()
                        )));
                    }
                    cursor = node.parent;
                }
                None => cursor = None,
            }
        }
        Ok(())
    }
}
