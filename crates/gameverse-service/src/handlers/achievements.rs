//! Achievement and leaderboard handlers, plus the grant hook.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use gameverse_core::{catalog, definition, AchievementId, LeaderboardEntry, PlayerId};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// How many rows the leaderboard returns.
const LEADERBOARD_SIZE: usize = 10;

/// Grant an achievement without ever failing the caller.
///
/// Achievement grants are a non-critical side effect of the operation that
/// triggered them (purchase, review): a failure here is logged and reported
/// as "not granted", never propagated.
pub(crate) fn grant_quietly(
    state: &AppState,
    player_id: PlayerId,
    achievement_id: AchievementId,
) -> bool {
    match state.store.grant_achievement(&player_id, achievement_id) {
        Ok(granted) => {
            if granted {
                tracing::info!(
                    player_id = %player_id,
                    achievement_id = %achievement_id,
                    "Achievement granted"
                );
            }
            granted
        }
        Err(e) => {
            tracing::error!(
                player_id = %player_id,
                achievement_id = %achievement_id,
                error = %e,
                "Achievement grant failed"
            );
            false
        }
    }
}

/// Achievement definition response.
#[derive(Debug, Serialize)]
pub struct AchievementResponse {
    /// Achievement ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Unlock condition description.
    pub description: String,
}

/// List all achievement definitions, ordered by name.
pub async fn list_achievements() -> Json<Vec<AchievementResponse>> {
    let definitions = catalog()
        .into_iter()
        .map(|a| AchievementResponse {
            id: a.id.0,
            name: a.name.to_string(),
            description: a.description.to_string(),
        })
        .collect();

    Json(definitions)
}

/// An unlocked achievement with its timestamp.
#[derive(Debug, Serialize)]
pub struct UnlockedAchievementResponse {
    /// Achievement ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Unlock condition description.
    pub description: String,
    /// When the player unlocked it.
    pub unlocked_at: String,
}

/// List the current player's unlocked achievements, most recent first.
pub async fn my_achievements(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<UnlockedAchievementResponse>>, ApiError> {
    let grants = state.store.list_grants(&auth.player_id)?;

    let unlocked = grants
        .iter()
        .map(|grant| {
            let def = definition(grant.achievement_id);
            UnlockedAchievementResponse {
                id: grant.achievement_id.0,
                name: def.as_ref().map_or("", |d| d.name).to_string(),
                description: def.as_ref().map_or("", |d| d.description).to_string(),
                unlocked_at: grant.unlocked_at.to_rfc3339(),
            }
        })
        .collect();

    Ok(Json(unlocked))
}

/// Leaderboard response row.
#[derive(Debug, Serialize)]
pub struct LeaderboardRowResponse {
    /// Player first name.
    pub first_name: String,
    /// Player last name.
    pub last_name: String,
    /// Achievements unlocked.
    pub achievements_unlocked: u64,
}

impl From<&LeaderboardEntry> for LeaderboardRowResponse {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            achievements_unlocked: entry.achievements_unlocked,
        }
    }
}

/// Get the achievement leaderboard.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardRowResponse>>, ApiError> {
    let entries = state.store.achievement_leaderboard(LEADERBOARD_SIZE)?;

    Ok(Json(
        entries.iter().map(LeaderboardRowResponse::from).collect(),
    ))
}
