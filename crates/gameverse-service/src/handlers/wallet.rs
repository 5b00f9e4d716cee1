//! Wallet balance and top-up handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use gameverse_core::{credit_cents, format_cents};
use gameverse_store::Store;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Wallet balance response.
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    /// Balance in cents.
    pub balance_cents: i64,
    /// Balance formatted as dollars.
    pub balance_formatted: String,
}

/// Get the current wallet balance.
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<WalletResponse>, ApiError> {
    let player = state
        .store
        .get_player(&auth.player_id)?
        .ok_or_else(|| ApiError::NotFound("Player not found".into()))?;

    Ok(Json(WalletResponse {
        balance_cents: player.wallet_balance_cents,
        balance_formatted: format_cents(player.wallet_balance_cents),
    }))
}

/// Wallet credit request.
#[derive(Debug, Deserialize)]
pub struct CreditWalletRequest {
    /// Amount in dollars to add. Must be a finite positive number.
    pub amount: f64,
}

/// Wallet credit response.
#[derive(Debug, Serialize)]
pub struct CreditWalletResponse {
    /// Confirmation message.
    pub message: String,
    /// New balance in cents.
    pub new_balance_cents: i64,
    /// New balance formatted as dollars.
    pub balance_formatted: String,
}

/// Add funds to the wallet.
///
/// The top-up is a self-reported credit; there is no payment provider
/// behind it.
pub async fn credit_wallet(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreditWalletRequest>,
) -> Result<Json<CreditWalletResponse>, ApiError> {
    let amount_cents = credit_cents(body.amount)?;

    let new_balance = state.store.credit_wallet(&auth.player_id, amount_cents)?;

    tracing::info!(
        player_id = %auth.player_id,
        amount_cents = %amount_cents,
        new_balance = %new_balance,
        "Wallet credited"
    );

    Ok(Json(CreditWalletResponse {
        message: "Funds added successfully!".into(),
        new_balance_cents: new_balance,
        balance_formatted: format_cents(new_balance),
    }))
}
