//! Catalog service: cached index and menu tree assembly
//!
//! The index is rebuilt lazily after `invalidate()`; every admin mutation of
//! sections or items fires the invalidation. A short staleness window
//! between an edit and the next rebuild is acceptable, but never more than
//! one invalidation cycle.

use super::index::CatalogIndex;
use crate::db::models::{MenuItem, MenuItemView, Section};
use crate::db::repository::{MenuItemRepository, RepoResult, SectionRepository};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::debug;

/// Menu tree node served to storefronts: a section with its items and
/// recursively nested child sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub sort_order: i32,
    pub items: Vec<MenuItemView>,
    pub children: Vec<MenuSection>,
}

/// Process-wide catalog access with an invalidation-driven index cache
pub struct CatalogService {
    sections: SectionRepository,
    items: MenuItemRepository,
    cache: RwLock<Option<Arc<CatalogIndex>>>,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            sections: SectionRepository::new(db.clone()),
            items: MenuItemRepository::new(db),
            cache: RwLock::new(None),
        }
    }

    pub fn sections(&self) -> &SectionRepository {
        &self.sections
    }

    pub fn items(&self) -> &MenuItemRepository {
        &self.items
    }

    /// Current index, rebuilding from storage if the cache was invalidated
    ///
    /// Two concurrent rebuilds after an invalidation are possible and
    /// harmless: building is idempotent read-repair.
    pub async fn index(&self) -> RepoResult<Arc<CatalogIndex>> {
        if let Some(index) = self.cache.read().clone() {
            return Ok(index);
        }

        let sections = self.sections.find_all().await?;
        let items = self.items.find_all().await?;
        let index = Arc::new(CatalogIndex::build(&sections, &items));
        debug!(items = index.len(), "Catalog index rebuilt");

        *self.cache.write() = Some(index.clone());
        Ok(index)
    }

    /// Drop the cached index; the next read rebuilds it
    pub fn invalidate(&self) {
        *self.cache.write() = None;
        debug!("Catalog index invalidated");
    }

    /// Assemble the nested menu tree for `GET /api/menu`
    pub async fn menu_tree(&self) -> RepoResult<Vec<MenuSection>> {
        let sections = self.sections.find_all().await?;
        let items = self.items.find_all().await?;
        Ok(build_tree(&sections, &items))
    }
}

/// Assemble nested menu sections from flat arena snapshots
fn build_tree(sections: &[Section], items: &[MenuItem]) -> Vec<MenuSection> {
    let mut children: HashMap<String, Vec<&Section>> = HashMap::new();
    let mut roots: Vec<&Section> = Vec::new();
    for section in sections {
        match &section.parent {
            Some(parent) => children
                .entry(parent.key().to_string())
                .or_default()
                .push(section),
            None => roots.push(section),
        }
    }

    let mut items_by_section: HashMap<String, Vec<&MenuItem>> = HashMap::new();
    for item in items {
        items_by_section
            .entry(item.section.key().to_string())
            .or_default()
            .push(item);
    }

    let mut visited = HashSet::new();
    roots
        .into_iter()
        .map(|root| build_node(root, &children, &items_by_section, &mut visited))
        .collect()
}

fn build_node(
    section: &Section,
    children: &HashMap<String, Vec<&Section>>,
    items_by_section: &HashMap<String, Vec<&MenuItem>>,
    visited: &mut HashSet<String>,
) -> MenuSection {
    let key = section.key();
    visited.insert(key.clone());

    let node_items = items_by_section
        .get(&key)
        .into_iter()
        .flatten()
        .map(|item| MenuItemView::from((*item).clone()))
        .collect();

    let mut node_children = Vec::new();
    if let Some(kids) = children.get(&key) {
        for child in kids {
            // Skip anything already emitted elsewhere; keeps a corrupt
            // arena from recursing forever
            if visited.contains(&child.key()) {
                continue;
            }
            node_children.push(build_node(child, children, items_by_section, visited));
        }
    }

    MenuSection {
        id: key,
        slug: section.slug.clone(),
        title: section.title.clone(),
        description: section.description.clone(),
        image_ref: section.image_ref.clone(),
        sort_order: section.sort_order,
        items: node_items,
        children: node_children,
    }
}
