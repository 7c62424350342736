use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `/admin`. Every handler takes `AuthUser` (401 when absent) and then
/// checks its own permission through `Identity::can` (403 when missing), so a
/// super-admin passes all of them.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/menu?locale=...
        // The unfiltered tree for the menu editor. Requires `menus.view`.
        .route("/menu", get(handlers::get_admin_menu))
        // GET /admin/route-permissions
        // The active path -> permission table. Requires `roles.view`.
        .route("/route-permissions", get(handlers::get_route_permissions))
}
