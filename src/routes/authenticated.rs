use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes for any caller that passed the authentication layer. The layer itself is
/// attached in `create_router`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The caller's account, roles and effective permissions.
        .route("/me", get(handlers::get_me))
}
