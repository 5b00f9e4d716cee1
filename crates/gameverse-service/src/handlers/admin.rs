//! Admin dashboard handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Platform stats response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Total registered players.
    pub total_players: u64,
    /// Total catalog entries.
    pub total_games: u64,
    /// Total licenses ever issued.
    pub total_licenses_sold: u64,
}

/// Platform-wide counters. Admin capability required.
pub async fn stats(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    auth.require_admin()?;

    let stats = state.store.stats()?;

    Ok(Json(StatsResponse {
        total_players: stats.players,
        total_games: stats.games,
        total_licenses_sold: stats.licenses_issued,
    }))
}
