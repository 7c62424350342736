use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{models::MenuRow, repository::Repository};

/// MenuItem
///
/// One node of the administrative menu tree. Children are stored already ordered
/// by `position` (ties keep their original row order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MenuItem {
    pub id: i64,
    /// Display label keyed by locale code ("en", "lv", ...).
    pub labels: BTreeMap<String, String>,
    /// Navigable target. Group headers and separators usually have none.
    pub path: Option<String>,
    pub parent_id: Option<i64>,
    pub position: i32,
    /// Non-interactive visual divider.
    pub separator: bool,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// The navigable target, treating an empty string the same as no path.
    pub fn target(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }
}

impl From<MenuRow> for MenuItem {
    fn from(row: MenuRow) -> Self {
        Self {
            id: row.id,
            labels: row.label.0,
            path: row.path,
            parent_id: row.parent_id,
            position: row.position,
            separator: row.is_separator,
            children: Vec::new(),
        }
    }
}

/// build_tree
///
/// Assembles flat `menu_items` rows into an ordered forest.
///
/// Siblings are sorted by `position` with a stable sort, so equal positions keep the
/// order the rows arrived in. A row whose `parent_id` does not exist in the set is
/// skipped with a warning; rows caught in a parent cycle are unreachable from any
/// root and never appear.
pub fn build_tree(rows: Vec<MenuRow>) -> Vec<MenuItem> {
    let known: HashSet<i64> = rows.iter().map(|row| row.id).collect();
    let mut by_parent: HashMap<Option<i64>, Vec<MenuItem>> = HashMap::new();

    for row in rows {
        match row.parent_id {
            Some(parent) if !known.contains(&parent) => {
                tracing::warn!(
                    id = row.id,
                    parent_id = parent,
                    "menu item references a missing parent"
                );
            }
            _ => by_parent.entry(row.parent_id).or_default().push(row.into()),
        }
    }

    for siblings in by_parent.values_mut() {
        siblings.sort_by_key(|item| item.position);
    }

    attach_children(None, &mut by_parent)
}

fn attach_children(
    parent: Option<i64>,
    by_parent: &mut HashMap<Option<i64>, Vec<MenuItem>>,
) -> Vec<MenuItem> {
    // `remove` guarantees each sibling list is consumed at most once.
    let mut items = by_parent.remove(&parent).unwrap_or_default();
    for item in &mut items {
        item.children = attach_children(Some(item.id), by_parent);
    }
    items
}

/// load_tree
///
/// The Menu Tree Store entry point: fetches every row through the repository and
/// returns the assembled tree.
pub async fn load_tree(repo: &dyn Repository) -> Vec<MenuItem> {
    let rows = repo.get_menu_items().await;
    tracing::debug!(rows = rows.len(), "loaded menu rows");
    build_tree(rows)
}
