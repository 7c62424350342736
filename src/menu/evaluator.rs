use std::sync::Arc;

use crate::{identity::Identity, menu::permissions::RoutePermissionMap, menu::tree::MenuItem};

/// AccessEvaluator
///
/// Produces the part of a menu tree a caller may see. The route table is injected at
/// construction; the evaluator holds no other state and never mutates its input.
#[derive(Debug, Clone, Default)]
pub struct AccessEvaluator {
    routes: RoutePermissionMap,
}

/// EvaluatorState
///
/// The shared, immutable evaluator handed to handlers through the application state.
pub type EvaluatorState = Arc<AccessEvaluator>;

impl AccessEvaluator {
    pub fn new(routes: RoutePermissionMap) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RoutePermissionMap {
        &self.routes
    }

    /// evaluate
    ///
    /// Filters `tree` for `identity`, preserving the relative order of surviving
    /// siblings.
    ///
    /// - No identity yields an empty menu, never a partial one.
    /// - A wildcard identity gets the tree back untouched.
    /// - Otherwise each node is decided after its children (post-order); see
    ///   `keep_item` for the rule order.
    pub fn evaluate(&self, tree: &[MenuItem], identity: Option<&Identity>) -> Vec<MenuItem> {
        let Some(identity) = identity else {
            tracing::debug!("no identity, menu is empty");
            return Vec::new();
        };

        if identity.is_wildcard() {
            return tree.to_vec();
        }

        let visible: Vec<MenuItem> = tree
            .iter()
            .filter_map(|item| self.filter_item(item, identity))
            .collect();

        tracing::debug!(
            roots = tree.len(),
            visible_roots = visible.len(),
            "evaluated menu visibility"
        );
        visible
    }

    fn filter_item(&self, item: &MenuItem, identity: &Identity) -> Option<MenuItem> {
        let children: Vec<MenuItem> = item
            .children
            .iter()
            .filter_map(|child| self.filter_item(child, identity))
            .collect();

        if !self.keep_item(item, &children, identity) {
            return None;
        }

        Some(MenuItem {
            id: item.id,
            labels: item.labels.clone(),
            path: item.path.clone(),
            parent_id: item.parent_id,
            position: item.position,
            separator: item.separator,
            children,
        })
    }

    /// First matching rule wins:
    /// separator, surviving children, emptied group without a target (drop),
    /// guarded target, and finally default-permit for plain leaves.
    fn keep_item(
        &self,
        item: &MenuItem,
        visible_children: &[MenuItem],
        identity: &Identity,
    ) -> bool {
        if item.separator {
            return true;
        }
        if !visible_children.is_empty() {
            return true;
        }
        match item.target() {
            None if !item.children.is_empty() => false,
            Some(path) => self.routes.permits(path, identity),
            None => true,
        }
    }
}
