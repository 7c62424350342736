use crate::models::{MenuRow, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. Handlers and the
/// `AuthUser` extractor only see this trait, so tests swap in in-memory mocks.
///
/// **Send + Sync + async_trait** are required to make the trait object (`Arc<dyn Repository>`)
/// safely shareable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Menu Tree Store ---
    // Every menu row, ordered by position then id.
    async fn get_menu_items(&self) -> Vec<MenuRow>;

    // --- User/Auth ---
    async fn get_user(&self, id: Uuid) -> Option<User>;
    // Role names assigned to the user.
    async fn get_user_roles(&self, user_id: Uuid) -> Vec<String>;
    // Permission names granted directly or implied by any of the user's roles.
    async fn get_user_permissions(&self, user_id: Uuid) -> Vec<String>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    /// get_menu_items
    ///
    /// Reads the whole `menu_items` table. Ordering by `position, id` gives the stable
    /// tie-break the tree builder relies on (equal positions keep insertion order).
    async fn get_menu_items(&self) -> Vec<MenuRow> {
        sqlx::query_as::<_, MenuRow>(
            r#"
            SELECT id, parent_id, position, path, label, is_separator
            FROM menu_items
            ORDER BY position ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_menu_items error: {:?}", e);
            vec![]
        })
    }

    /// get_user
    ///
    /// Retrieves the account row needed to confirm the token subject still exists.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }

    /// get_user_roles
    async fn get_user_roles(&self, user_id: Uuid) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM roles r
            JOIN role_user ru ON ru.role_id = r.id
            WHERE ru.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_user_roles error: {:?}", e);
            vec![]
        })
    }

    /// get_user_permissions
    ///
    /// Unions role-implied permissions with permissions granted to the user directly.
    async fn get_user_permissions(&self, user_id: Uuid) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT p.name
            FROM permissions p
            JOIN permission_role pr ON pr.permission_id = p.id
            JOIN role_user ru ON ru.role_id = pr.role_id
            WHERE ru.user_id = $1
            UNION
            SELECT p.name
            FROM permissions p
            JOIN permission_user pu ON pu.permission_id = p.id
            WHERE pu.user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_user_permissions error: {:?}", e);
            vec![]
        })
    }
}
