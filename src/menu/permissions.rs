use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{config::ConfigError, identity::Identity, models::RoutePermissionEntry};

// =============================================================================
// Permission names guarding the admin API itself
// =============================================================================

/// Permission to see the unfiltered menu tree.
pub const MENUS_VIEW: &str = "menus.view";
/// Permission to inspect roles and the route table.
pub const ROLES_VIEW: &str = "roles.view";

/// The built-in route table for the corporate CMS admin area.
const DEFAULT_ROUTE_PERMISSIONS: &[(&str, &str)] = &[
    ("/admin/users", "users.view"),
    ("/admin/roles", ROLES_VIEW),
    ("/admin/permissions", "permissions.view"),
    ("/admin/menus", MENUS_VIEW),
    ("/admin/configurations", "configurations.view"),
    ("/admin/audit-logs", "audit-logs.view"),
    ("/admin/news", "news.view"),
    ("/admin/events", "events.view"),
    ("/admin/careers", "careers.view"),
    ("/admin/team-members", "team-members.view"),
    ("/admin/departments", "departments.view"),
    ("/admin/locations", "locations.view"),
];

/// RoutePermissionMap
///
/// Declares which permission guards which navigable path. Lookup is exact-match only:
/// no prefixes, no patterns. A path that is not in the map is open to every
/// authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePermissionMap {
    entries: HashMap<String, String>,
}

impl RoutePermissionMap {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(path, permission)| (path.into(), permission.into()))
                .collect(),
        }
    }

    /// An empty map: every path is open.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// from_json_str
    ///
    /// Parses a JSON object of `"path": "permission"` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// from_json_file
    ///
    /// Loads a replacement route table from disk. Used at startup when
    /// `ROUTE_PERMISSIONS_PATH` is set.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The permission required for `path`, if the path is guarded.
    pub fn required_for(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// permits
    ///
    /// Whether `identity` may navigate to `path`.
    pub fn permits(&self, path: &str, identity: &Identity) -> bool {
        match self.required_for(path) {
            Some(permission) => identity.can(permission),
            None => true,
        }
    }

    /// All entries, sorted by path for stable output.
    pub fn entries(&self) -> Vec<RoutePermissionEntry> {
        let mut entries: Vec<RoutePermissionEntry> = self
            .entries
            .iter()
            .map(|(path, permission)| RoutePermissionEntry {
                path: path.clone(),
                permission: permission.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RoutePermissionMap {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_PERMISSIONS.iter().copied())
    }
}
