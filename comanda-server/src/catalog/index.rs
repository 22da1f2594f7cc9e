//! Catalog index: flat item lookup over the recursive section tree
//!
//! `build` is a pure function of a tree snapshot: it never touches storage
//! and its only output is the returned map. Callers cache the result and
//! invalidate on admin edits.

use crate::db::models::{MenuItem, Section};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Authoritative item facts at index-build time
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedItem {
    pub item_id: String,
    pub name: String,
    pub price: Decimal,
    pub is_available: bool,
    /// Key of the section the item was reached through
    pub section: String,
}

/// Flattened map from item id to its authoritative `(name, price, availability)`
#[derive(Debug, Default)]
pub struct CatalogIndex {
    items: HashMap<String, IndexedItem>,
}

impl CatalogIndex {
    /// Build the index by recursively walking the section arena
    ///
    /// Walks depth-first from the root sections (no parent), following the
    /// parent/children relation. Sections unreachable from any root (a
    /// broken parent pointer or a cycle) are skipped and flagged; their
    /// items never become orderable. A duplicate item id across sections is
    /// a data-integrity violation: last write wins, flagged at `warn`.
    pub fn build(sections: &[Section], items: &[MenuItem]) -> Self {
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

        let mut index: HashMap<String, IndexedItem> = HashMap::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack: Vec<&Section> = roots;

        while let Some(section) = stack.pop() {
            let key = section.key();
            if !visited.insert(key.clone()) {
                // Already walked through another path; the arena is not a tree
                warn!(section = %key, "Section reached twice while indexing catalog");
                continue;
            }

            for item in items_by_section.get(&key).into_iter().flatten() {
                let item_id = item.key();
                let entry = IndexedItem {
                    item_id: item_id.clone(),
                    name: item.name.clone(),
                    price: item.price,
                    is_available: item.is_available,
                    section: key.clone(),
                };
                if let Some(previous) = index.insert(item_id.clone(), entry) {
                    warn!(
                        item = %item_id,
                        first_section = %previous.section,
                        second_section = %key,
                        "Duplicate item id across sections; keeping the later entry"
                    );
                }
            }

            if let Some(kids) = children.get(&key) {
                stack.extend(kids.iter().copied());
            }
        }

        for section in sections {
            if !visited.contains(&section.key()) {
                warn!(
                    section = %section.key(),
                    "Section unreachable from any root; its items are not indexed"
                );
            }
        }

        Self { items: index }
    }

    /// Look up an item by id
    ///
    /// `None` is a legitimate outcome (the client may reference a deleted
    /// or mistyped id) and must not crash the caller.
    pub fn lookup(&self, item_id: &str) -> Option<&IndexedItem> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
