use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without credentials.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /menu?locale=...
        // The caller's visible menu. Anonymous callers receive `[]`.
        .route("/menu", get(handlers::get_menu))
}
