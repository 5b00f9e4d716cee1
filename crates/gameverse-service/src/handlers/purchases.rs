//! Purchase and library handlers.
//!
//! The purchase handler is the entry point of the purchase coordinator:
//! it validates the request, delegates the atomic transaction to the
//! store, and fires the first-purchase achievement hook after commit.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use gameverse_core::{format_cents, price_cents, GameId, FIRST_PURCHASE};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::handlers::achievements;
use crate::handlers::games::GameResponse;
use crate::state::AppState;

/// Purchase request.
///
/// The price is the client-asserted charge amount, matching the upstream
/// contract; the coordinator charges exactly this value.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    /// The game to purchase.
    pub game_id: String,
    /// Price in dollars. Must be a finite number >= 0.
    pub price: f64,
}

/// Purchase response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Confirmation message.
    pub message: String,
    /// The license minted by the purchase.
    pub license_id: String,
    /// New wallet balance in cents.
    pub new_balance_cents: i64,
    /// New balance formatted as dollars.
    pub balance_formatted: String,
}

/// Purchase a game license.
pub async fn purchase_game(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    // Validate before opening a transaction.
    let game_id = body
        .game_id
        .parse::<GameId>()
        .map_err(|_| ApiError::BadRequest("Invalid game ID".into()))?;
    let amount_cents = price_cents(body.price)?;

    // The atomic unit: lock the wallet row, check funds, debit, mint the
    // license and both entitlement links. Rolls back on every failure.
    let receipt = state
        .store
        .purchase_game(&auth.player_id, &game_id, amount_cents)?;

    tracing::info!(
        player_id = %auth.player_id,
        game_id = %game_id,
        price_cents = %amount_cents,
        license_id = %receipt.license_id,
        new_balance = %receipt.new_balance_cents,
        first_purchase = %receipt.first_purchase,
        "Purchase committed"
    );

    // Post-commit side effect, outside the transaction: the wallet lock is
    // already released, and a grant failure never fails the purchase.
    if receipt.first_purchase {
        achievements::grant_quietly(&state, auth.player_id, FIRST_PURCHASE);
    }

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            message: "Purchase successful!".into(),
            license_id: receipt.license_id.to_string(),
            new_balance_cents: receipt.new_balance_cents,
            balance_formatted: format_cents(receipt.new_balance_cents),
        }),
    ))
}

/// List the games the current player owns.
pub async fn list_library(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.store.owned_games(&auth.player_id)?;

    Ok(Json(games.iter().map(GameResponse::from).collect()))
}
