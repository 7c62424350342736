use crate::{menu::tree::MenuItem, models::MenuNode};

/// MenuSerializer
///
/// Shapes filtered menu items into `MenuNode`s with a single resolved label.
///
/// Label resolution order: requested locale, then the configured default locale,
/// then the lexically first locale the item has. An item with no labels at all gets
/// an empty string.
#[derive(Debug, Clone)]
pub struct MenuSerializer {
    default_locale: String,
}

impl MenuSerializer {
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
        }
    }

    pub fn serialize(&self, items: &[MenuItem], locale: Option<&str>) -> Vec<MenuNode> {
        items.iter().map(|item| self.node(item, locale)).collect()
    }

    fn node(&self, item: &MenuItem, locale: Option<&str>) -> MenuNode {
        MenuNode {
            id: item.id,
            label: self.label(item, locale),
            path: item.path.clone(),
            separator: item.separator,
            children: self.serialize(&item.children, locale),
        }
    }

    fn label(&self, item: &MenuItem, locale: Option<&str>) -> String {
        locale
            .and_then(|locale| item.labels.get(locale))
            .or_else(|| item.labels.get(&self.default_locale))
            .or_else(|| item.labels.values().next())
            .cloned()
            .unwrap_or_default()
    }
}
