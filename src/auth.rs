use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    identity::Identity,
    models::User,
    repository::RepositoryState,
};

/// Claims
///
/// The JWT payload expected on every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the user in the `users` table.
    pub sub: Uuid,
    /// Expiration Time (exp): tokens past this timestamp are rejected.
    pub exp: usize,
    /// Issued At (iat).
    pub iat: usize,
}

/// AuthUser
///
/// The resolved caller of an authenticated request: the account plus its `Identity`
/// (roles, permissions, wildcard flag) loaded from the repository.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub identity: Identity,
}

/// AuthUser Extractor Implementation
///
/// 1. Local Bypass: in `Env::Local`, an `x-user-id` header naming an existing user.
/// 2. Token Validation: Bearer token extraction and JWT decoding.
/// 3. DB Lookup: the user must still exist; roles and permissions are loaded.
///
/// Rejection: Returns StatusCode::UNAUTHORIZED (401) on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        if config.env == Env::Local {
            if let Some(user_id) = bypass_user_id(parts) {
                if let Some(user) = repo.get_user(user_id).await {
                    return Ok(resolve(&repo, &config, user).await);
                }
            }
        }

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            StatusCode::UNAUTHORIZED
        })?;

        let user = repo
            .get_user(token_data.claims.sub)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(resolve(&repo, &config, user).await)
    }
}

fn bypass_user_id(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

async fn resolve(repo: &RepositoryState, config: &AppConfig, user: User) -> AuthUser {
    let roles = repo.get_user_roles(user.id).await;
    let permissions = repo.get_user_permissions(user.id).await;
    let identity = Identity::new(roles, permissions, &config.super_admin_role);

    tracing::debug!(
        user_id = %user.id,
        roles = identity.roles().len(),
        permissions = identity.permissions().len(),
        super_admin = identity.is_wildcard(),
        "resolved identity"
    );

    AuthUser {
        id: user.id,
        email: user.email,
        identity,
    }
}

/// MaybeAuthUser
///
/// Optional authentication for routes that degrade instead of rejecting: any
/// authentication failure simply yields `None`.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
