//! Authentication extractor.
//!
//! This module provides the `AuthUser` extractor, which turns the bearer
//! JWT on a request into a typed principal (player id + role). Role-gated
//! handlers call [`AuthUser::require_admin`] instead of inspecting token
//! payloads ad hoc.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use gameverse_core::{PlayerId, Role};

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated principal extracted from a bearer JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The player ID from the token's `sub` claim.
    pub player_id: PlayerId,

    /// The platform role carried by the token.
    pub role: Role,
}

impl AuthUser {
    /// Require the admin capability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` if the principal is not an admin.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Extract the Authorization header
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            // Extract the Bearer token
            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            // Allow test tokens in testing only.
            // This bypass is gated behind #[cfg(test)] or the "test-auth"
            // feature to ensure it is never active in production builds.
            #[cfg(any(test, feature = "test-auth"))]
            if let Some(user) = parse_test_token(token) {
                return Ok(user);
            }

            validate_token(token, &state.config.jwt_secret)
        })
    }
}

/// JWT claims carried by GameVerse tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (player ID).
    pub sub: String,
    /// Platform role ("user" or "admin").
    pub role: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at.
    pub iat: i64,
}

/// Validate an HS256 JWT and build the typed principal.
fn validate_token(token: &str, secret: &str) -> Result<AuthUser, ApiError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized
    })?;

    let player_id = token_data
        .claims
        .sub
        .parse::<PlayerId>()
        .map_err(|_| ApiError::Unauthorized)?;

    let role = match token_data.claims.role.as_str() {
        "admin" => Role::Admin,
        "user" => Role::User,
        _ => return Err(ApiError::Unauthorized),
    };

    Ok(AuthUser { player_id, role })
}

/// Parse a test token: `test-token:<uuid>` for users,
/// `test-admin:<uuid>` for admins.
#[cfg(any(test, feature = "test-auth"))]
fn parse_test_token(token: &str) -> Option<AuthUser> {
    let (role, id_str) = if let Some(rest) = token.strip_prefix("test-token:") {
        (Role::User, rest)
    } else if let Some(rest) = token.strip_prefix("test-admin:") {
        (Role::Admin, rest)
    } else {
        return None;
    };

    let player_id = id_str.parse::<PlayerId>().ok()?;
    Some(AuthUser { player_id, role })
}
