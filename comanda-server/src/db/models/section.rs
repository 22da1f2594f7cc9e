//! Section Model (catalog tree node)
//!
//! Sections form the recursive menu tree. The tree is stored as an arena:
//! every section lives in one flat table and `parent` is an optional record
//! link, so "is this still a tree" stays a checkable invariant (no id may
//! appear in its own ancestor chain).

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type SectionId = RecordId;

/// Section model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SectionId>,
    /// URL-safe identifier, unique across all sections
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Parent section link; `None` for top-level sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<SectionId>,
    #[serde(default)]
    pub sort_order: i32,
}

impl Section {
    /// Record key as a plain string, empty when not yet persisted
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.key().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCreate {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_ref: Option<String>,
    /// Parent section id (plain key or `section:key`)
    pub parent: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Re-parent; rejected if it would create a cycle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// API view of a section: record links flattened to strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionView {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub sort_order: i32,
}

impl From<Section> for SectionView {
    fn from(s: Section) -> Self {
        Self {
            id: s.id.as_ref().map(|t| t.key().to_string()).unwrap_or_default(),
            slug: s.slug,
            title: s.title,
            description: s.description,
            image_ref: s.image_ref,
            parent: s.parent.as_ref().map(|t| t.key().to_string()),
            sort_order: s.sort_order,
        }
    }
}
