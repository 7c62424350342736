use crate::{
    AppState,
    auth::{AuthUser, MaybeAuthUser},
    menu::{
        MenuSerializer,
        permissions::{MENUS_VIEW, ROLES_VIEW},
        tree::load_tree,
    },
    models::{IdentityProfile, MenuNode, RoutePermissionEntry},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// --- Filter Structs ---

/// MenuQuery
///
/// Query parameters accepted by the menu endpoints.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct MenuQuery {
    /// Locale code used to pick each item's label (e.g. "en", "lv").
    pub locale: Option<String>,
}

// --- Handlers ---

/// get_menu
///
/// [Public Route] The navigation menu of the calling user.
///
/// The full tree is loaded from the Menu Tree Store, filtered by the `AccessEvaluator`
/// against the caller's identity, and serialized for the requested locale.
/// Unauthenticated callers get an empty menu, not an error.
#[utoipa::path(
    get,
    path = "/menu",
    params(MenuQuery),
    responses((status = 200, description = "Visible menu", body = [MenuNode]))
)]
pub async fn get_menu(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<Vec<MenuNode>> {
    // No identity: skip the store entirely, the answer is always an empty menu.
    let Some(user) = user else {
        tracing::debug!("anonymous menu request");
        return Json(Vec::new());
    };

    let tree = load_tree(state.repo.as_ref()).await;
    let visible = state.evaluator.evaluate(&tree, Some(&user.identity));

    let serializer = MenuSerializer::new(state.config.default_locale.as_str());
    Json(serializer.serialize(&visible, query.locale.as_deref()))
}

/// get_me
///
/// [Authenticated Route] The caller's account, roles and effective permissions.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile", body = IdentityProfile),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_me(AuthUser { id, email, identity }: AuthUser) -> Json<IdentityProfile> {
    Json(IdentityProfile {
        id,
        email,
        roles: identity.roles().iter().cloned().collect(),
        permissions: identity.permissions().iter().cloned().collect(),
        is_super_admin: identity.is_wildcard(),
    })
}

/// get_admin_menu
///
/// [Admin Route] The complete, unfiltered menu tree for the menu editor.
///
/// *Authorization*: requires `menus.view`.
#[utoipa::path(
    get,
    path = "/admin/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Full menu", body = [MenuNode]),
        (status = 403, description = "Missing menus.view")
    )
)]
pub async fn get_admin_menu(
    AuthUser { identity, .. }: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<MenuNode>>, StatusCode> {
    if !identity.can(MENUS_VIEW) {
        return Err(StatusCode::FORBIDDEN);
    }

    let tree = load_tree(state.repo.as_ref()).await;
    let serializer = MenuSerializer::new(state.config.default_locale.as_str());
    Ok(Json(serializer.serialize(&tree, query.locale.as_deref())))
}

/// get_route_permissions
///
/// [Admin Route] The active route-permission table, sorted by path.
///
/// *Authorization*: requires `roles.view`.
#[utoipa::path(
    get,
    path = "/admin/route-permissions",
    responses(
        (status = 200, description = "Route table", body = [RoutePermissionEntry]),
        (status = 403, description = "Missing roles.view")
    )
)]
pub async fn get_route_permissions(
    AuthUser { identity, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RoutePermissionEntry>>, StatusCode> {
    if !identity.can(ROLES_VIEW) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(state.evaluator.routes().entries()))
}
