use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The account record stored in the `users` table. Roles and permissions live in
/// their own tables and are resolved separately by the `AuthUser` extractor.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// MenuRow
///
/// Raw Database Row (Internal Use). Directly maps to the `menu_items` table.
/// Assembled into `MenuItem` trees by `menu::tree::build_tree`.
#[derive(Debug, Clone, FromRow)]
pub struct MenuRow {
    pub id: i64,
    // Null for root items.
    pub parent_id: Option<i64>,
    // Ascending among siblings.
    pub position: i32,
    pub path: Option<String>,
    // JSONB object of locale -> label.
    pub label: Json<BTreeMap<String, String>>,
    pub is_separator: bool,
}

// --- Response Schemas (Output) ---

/// MenuNode
///
/// One entry of the menu as sent to the front-end renderer (GET /menu).
/// `label` is already resolved for the requested locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MenuNode {
    pub id: i64,
    pub label: String,

    // Separators and group headers usually have no target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub path: Option<String>,

    pub separator: bool,

    #[schema(no_recursion)]
    pub children: Vec<MenuNode>,
}

/// IdentityProfile
///
/// Output schema for the authenticated caller (GET /me): who they are and what they
/// hold, with the wildcard role already resolved into `is_super_admin`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct IdentityProfile {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub is_super_admin: bool,
}

/// RoutePermissionEntry
///
/// One row of the route table: the exact path and the single permission guarding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct RoutePermissionEntry {
    #[schema(example = "/admin/users")]
    pub path: String,
    #[schema(example = "users.view")]
    pub permission: String,
}
