//! Player profile handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use gameverse_core::{format_cents, Player};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Player profile response.
#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    /// Player ID.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Platform role.
    pub role: String,
    /// Wallet balance in cents.
    pub wallet_balance_cents: i64,
    /// Balance formatted as dollars.
    pub balance_formatted: String,
    /// Registration timestamp.
    pub joined_at: String,
}

impl From<&Player> for PlayerResponse {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            email: player.email.clone(),
            role: player.role.as_str().to_string(),
            wallet_balance_cents: player.wallet_balance_cents,
            balance_formatted: format_cents(player.wallet_balance_cents),
            joined_at: player.joined_at.to_rfc3339(),
        }
    }
}

/// Register player request.
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
}

/// Register a profile for the authenticated principal.
///
/// Identity (id and role) comes from the token; this endpoint only attaches
/// profile data and opens the wallet at a zero balance.
pub async fn register_player(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<RegisterPlayerRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>), ApiError> {
    if body.first_name.trim().is_empty()
        || body.last_name.trim().is_empty()
        || body.email.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "first_name, last_name and email are required".into(),
        ));
    }

    if state.store.get_player(&auth.player_id)?.is_some() {
        return Err(ApiError::Conflict("Player already registered".into()));
    }

    let mut player = Player::new(auth.player_id, body.first_name, body.last_name, body.email);
    player.role = auth.role;

    state.store.put_player(&player)?;

    tracing::info!(player_id = %auth.player_id, role = %player.role.as_str(), "Player registered");

    Ok((StatusCode::CREATED, Json(PlayerResponse::from(&player))))
}

/// Get the current player's profile.
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<PlayerResponse>, ApiError> {
    let player = state
        .store
        .get_player(&auth.player_id)?
        .ok_or_else(|| ApiError::NotFound("Player not found".into()))?;

    Ok(Json(PlayerResponse::from(&player)))
}
