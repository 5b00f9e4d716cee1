//! Review handlers.
//!
//! Review creation is the second caller of the achievement-grant hook: a
//! player's first review unlocks the first-review achievement.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use gameverse_core::{GameId, Review, FIRST_REVIEW};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::achievements;
use crate::state::AppState;

/// Review response.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    /// Review ID.
    pub id: String,
    /// The author's experience with the game.
    pub experience: String,
    /// Free-form feedback.
    pub feedback: String,
    /// Recommendation text.
    pub recommendation: String,
    /// Author first name.
    pub author_first_name: String,
    /// Author last name.
    pub author_last_name: String,
    /// When the review was posted.
    pub created_at: String,
}

impl ReviewResponse {
    /// Build a response, resolving the author's name from the store.
    pub(crate) fn with_author(review: &Review, store: &dyn Store) -> Result<Self, ApiError> {
        let author = store.get_player(&review.player_id)?;
        let (first, last) = author
            .map(|p| (p.first_name, p.last_name))
            .unwrap_or_default();

        Ok(Self {
            id: review.id.to_string(),
            experience: review.experience.clone(),
            feedback: review.feedback.clone(),
            recommendation: review.recommendation.clone(),
            author_first_name: first,
            author_last_name: last,
            created_at: review.created_at.to_rfc3339(),
        })
    }
}

/// Post review request.
#[derive(Debug, Deserialize)]
pub struct PostReviewRequest {
    /// The author's experience with the game.
    pub experience: String,
    /// Free-form feedback.
    pub feedback: String,
    /// Recommendation text.
    pub recommendation: String,
}

/// Post a review for a game.
pub async fn post_review(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<PostReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let game_id = id
        .parse::<GameId>()
        .map_err(|_| ApiError::BadRequest("Invalid game ID".into()))?;

    if body.experience.trim().is_empty()
        || body.feedback.trim().is_empty()
        || body.recommendation.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "experience, feedback and recommendation are required".into(),
        ));
    }

    if state.store.get_game(&game_id)?.is_none() {
        return Err(ApiError::NotFound("Game not found".into()));
    }

    // First-review check happens before the insert. A racing duplicate
    // trigger is harmless: the grant hook itself is at-most-once.
    let first_review = state.store.count_reviews_by_player(&auth.player_id)? == 0;

    let review = Review::new(
        game_id,
        auth.player_id,
        body.experience,
        body.feedback,
        body.recommendation,
    );
    state.store.put_review(&review)?;

    tracing::info!(
        player_id = %auth.player_id,
        game_id = %game_id,
        review_id = %review.id,
        "Review posted"
    );

    if first_review {
        achievements::grant_quietly(&state, auth.player_id, FIRST_REVIEW);
    }

    let response = ReviewResponse::with_author(&review, state.store.as_ref())?;
    Ok((StatusCode::CREATED, Json(response)))
}
