use async_trait::async_trait;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use cms_backend::{
    AppState,
    auth::{AuthUser, MaybeAuthUser},
    config::AppConfig,
    handlers::{self, MenuQuery},
    identity::Identity,
    menu::{AccessEvaluator, RoutePermissionMap},
    models::{MenuRow, User},
    repository::Repository,
};
use sqlx::types::Json as SqlJson;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::test;
use uuid::Uuid;

// --- MOCK REPOSITORY IMPLEMENTATION ---

// Central control point for handler tests: canned menu rows.
#[derive(Default)]
pub struct MockRepoControl {
    pub menu_rows: Vec<MenuRow>,
}

#[async_trait]
impl Repository for MockRepoControl {
    async fn get_menu_items(&self) -> Vec<MenuRow> {
        self.menu_rows.clone()
    }
    // Identity is injected directly into AuthUser in these tests.
    async fn get_user(&self, _id: Uuid) -> Option<User> {
        None
    }
    async fn get_user_roles(&self, _user_id: Uuid) -> Vec<String> {
        vec![]
    }
    async fn get_user_permissions(&self, _user_id: Uuid) -> Vec<String> {
        vec![]
    }
}

// --- TEST UTILITIES ---

const TEST_ID: Uuid = Uuid::from_u128(123);

fn row(
    id: i64,
    parent_id: Option<i64>,
    position: i32,
    path: Option<&str>,
    en: &str,
    lv: &str,
) -> MenuRow {
    MenuRow {
        id,
        parent_id,
        position,
        path: path.map(str::to_string),
        label: SqlJson(BTreeMap::from([
            ("en".to_string(), en.to_string()),
            ("lv".to_string(), lv.to_string()),
        ])),
        is_separator: false,
    }
}

/// Site menu: Dashboard, System (Users, Roles), ---, Content (About).
fn menu_rows() -> Vec<MenuRow> {
    let mut divider = row(4, None, 2, None, "", "");
    divider.is_separator = true;
    divider.label = SqlJson(BTreeMap::new());

    vec![
        row(1, None, 0, Some("/dashboard"), "Dashboard", "Panelis"),
        row(2, None, 1, None, "System", "Sistēma"),
        row(3, Some(2), 0, Some("/admin/users"), "Users", "Lietotāji"),
        row(6, Some(2), 1, Some("/admin/roles"), "Roles", "Lomas"),
        divider,
        row(5, None, 3, None, "Content", "Saturs"),
        row(7, Some(5), 0, Some("/content/about"), "About", "Par mums"),
    ]
}

fn route_map() -> RoutePermissionMap {
    RoutePermissionMap::new([
        ("/admin/users", "users.view"),
        ("/admin/roles", "roles.view"),
        ("/content/about", "about.view"),
    ])
}

fn create_test_state(repo_control: MockRepoControl) -> AppState {
    AppState {
        repo: Arc::new(repo_control),
        evaluator: Arc::new(AccessEvaluator::new(route_map())),
        config: AppConfig::default(),
    }
}

fn user_with(roles: &[&str], permissions: &[&str]) -> AuthUser {
    AuthUser {
        id: TEST_ID,
        email: "user@example.com".to_string(),
        identity: Identity::new(roles.iter().copied(), permissions.iter().copied(), "super-admin"),
    }
}

fn locale(locale: &str) -> Query<MenuQuery> {
    Query(MenuQuery {
        locale: Some(locale.to_string()),
    })
}

// --- HANDLER TESTS ---

#[test]
async fn test_get_menu_anonymous_is_empty() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });

    let Json(menu) = handlers::get_menu(MaybeAuthUser(None), State(state), locale("en")).await;

    assert!(menu.is_empty());
}

#[test]
async fn test_get_menu_filters_by_permission() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });
    let user = user_with(&["editor"], &["about.view"]);

    let Json(menu) = handlers::get_menu(MaybeAuthUser(Some(user)), State(state), locale("en")).await;

    // System lost both children and has no path of its own.
    let labels: Vec<&str> = menu.iter().map(|node| node.label.as_str()).collect();
    assert_eq!(labels, vec!["Dashboard", "", "Content"]);
    assert!(menu[1].separator);
    assert_eq!(menu[2].children.len(), 1);
    assert_eq!(menu[2].children[0].label, "About");
}

#[test]
async fn test_get_menu_localizes_labels() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });
    let user = user_with(&["editor"], &["users.view"]);

    let Json(menu) = handlers::get_menu(MaybeAuthUser(Some(user)), State(state), locale("lv")).await;

    assert_eq!(menu[0].label, "Panelis");
    assert_eq!(menu[1].label, "Sistēma");
    assert_eq!(menu[1].children.len(), 1);
    assert_eq!(menu[1].children[0].label, "Lietotāji");
}

#[test]
async fn test_get_menu_super_admin_sees_everything() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });
    let user = user_with(&["super-admin"], &[]);

    let Json(menu) = handlers::get_menu(
        MaybeAuthUser(Some(user)),
        State(state),
        Query(MenuQuery::default()),
    )
    .await;

    assert_eq!(menu.len(), 4);
    assert_eq!(menu[1].children.len(), 2);
    assert_eq!(menu[3].children.len(), 1);
}

#[test]
async fn test_get_me_reports_identity() {
    let user = user_with(&["editor"], &["news.view", "about.view"]);

    let Json(profile) = handlers::get_me(user).await;

    assert_eq!(profile.id, TEST_ID);
    assert_eq!(profile.roles, vec!["editor".to_string()]);
    assert_eq!(
        profile.permissions,
        vec!["about.view".to_string(), "news.view".to_string()]
    );
    assert!(!profile.is_super_admin);
}

#[test]
async fn test_get_admin_menu_forbidden() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });

    let result = handlers::get_admin_menu(
        user_with(&["editor"], &["about.view"]),
        State(state),
        locale("en"),
    )
    .await;

    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);
}

#[test]
async fn test_get_admin_menu_returns_unfiltered_tree() {
    let state = create_test_state(MockRepoControl {
        menu_rows: menu_rows(),
    });

    // menus.view alone: none of the menu's own routes are permitted, yet the editor
    // view is the whole tree.
    let Json(menu) = handlers::get_admin_menu(
        user_with(&["editor"], &["menus.view"]),
        State(state),
        locale("en"),
    )
    .await
    .unwrap();

    assert_eq!(menu.len(), 4);
    assert_eq!(menu[1].children.len(), 2);
}

#[test]
async fn test_get_route_permissions_requires_roles_view() {
    let state = create_test_state(MockRepoControl::default());

    let result = handlers::get_route_permissions(user_with(&["editor"], &[]), State(state)).await;

    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);
}

#[test]
async fn test_get_route_permissions_sorted_by_path() {
    let state = create_test_state(MockRepoControl::default());

    let Json(entries) =
        handlers::get_route_permissions(user_with(&["super-admin"], &[]), State(state))
            .await
            .unwrap();

    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/admin/roles", "/admin/users", "/content/about"]);
    assert_eq!(entries[1].permission, "users.view");
}
