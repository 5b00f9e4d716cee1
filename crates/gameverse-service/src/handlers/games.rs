//! Game catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use gameverse_core::{format_cents, price_cents, Game, GameId};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::reviews::ReviewResponse;
use crate::state::AppState;

/// How many entries the featured list returns.
const FEATURED_GAME_COUNT: usize = 4;

/// Game catalog response.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    /// Game ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Genre label.
    pub genre: String,
    /// Editorial rating.
    pub rating: f32,
    /// List price in cents.
    pub price_cents: i64,
    /// List price formatted as dollars.
    pub price_formatted: String,
    /// Optional cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Game> for GameResponse {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id.to_string(),
            title: game.title.clone(),
            genre: game.genre.clone(),
            rating: game.rating,
            price_cents: game.price_cents,
            price_formatted: format_cents(game.price_cents),
            image_url: game.image_url.clone(),
        }
    }
}

/// List the whole catalog, ordered by title.
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.store.list_games()?;

    Ok(Json(games.iter().map(GameResponse::from).collect()))
}

/// List the most recently added games.
pub async fn featured_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.store.recent_games(FEATURED_GAME_COUNT)?;

    Ok(Json(games.iter().map(GameResponse::from).collect()))
}

/// Game detail response: the catalog entry plus its reviews.
#[derive(Debug, Serialize)]
pub struct GameDetailResponse {
    /// The catalog entry.
    pub game: GameResponse,
    /// Reviews, newest first.
    pub reviews: Vec<ReviewResponse>,
}

/// Get one game and its reviews.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<GameDetailResponse>, ApiError> {
    let game_id = id
        .parse::<GameId>()
        .map_err(|_| ApiError::BadRequest("Invalid game ID".into()))?;

    let game = state
        .store
        .get_game(&game_id)?
        .ok_or_else(|| ApiError::NotFound("Game not found".into()))?;

    let reviews = state.store.list_reviews_for_game(&game_id)?;
    let reviews = reviews
        .iter()
        .map(|review| ReviewResponse::with_author(review, state.store.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(GameDetailResponse {
        game: GameResponse::from(&game),
        reviews,
    }))
}

/// Create game request.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    /// Display title.
    pub title: String,
    /// Genre label.
    pub genre: String,
    /// Editorial rating, 0.0 to 5.0.
    pub rating: f32,
    /// List price in dollars.
    pub price: f64,
    /// Optional cover image URL.
    pub image_url: Option<String>,
}

/// Add a game to the catalog. Admin capability required.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), ApiError> {
    auth.require_admin()?;

    if body.title.trim().is_empty() || body.genre.trim().is_empty() {
        return Err(ApiError::BadRequest("title and genre are required".into()));
    }
    if !(0.0..=5.0).contains(&body.rating) {
        return Err(ApiError::BadRequest(
            "rating must be between 0.0 and 5.0".into(),
        ));
    }
    let list_price_cents = price_cents(body.price)?;

    let game = Game::new(
        body.title,
        body.genre,
        body.rating,
        list_price_cents,
        body.image_url,
    );
    state.store.put_game(&game)?;

    tracing::info!(
        game_id = %game.id,
        title = %game.title,
        price_cents = %game.price_cents,
        admin_id = %auth.player_id,
        "Game added to catalog"
    );

    Ok((StatusCode::CREATED, Json(GameResponse::from(&game))))
}
