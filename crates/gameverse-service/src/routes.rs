//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{achievements, admin, games, health, players, purchases, reviews, wallet};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /v1/games` - Catalog listing
/// - `GET /v1/games/featured` - Recently added games
/// - `GET /v1/games/{id}` - One game with its reviews
/// - `GET /v1/achievements` - Achievement definitions
/// - `GET /v1/leaderboard` - Achievement leaderboard
///
/// ## Authenticated (bearer JWT)
/// - `POST /v1/players` - Register a profile
/// - `GET /v1/players/me` - Current profile
/// - `GET /v1/wallet` - Wallet balance
/// - `POST /v1/wallet/credit` - Add funds
/// - `POST /v1/purchases` - Purchase a game license
/// - `GET /v1/library` - Owned games
/// - `POST /v1/games/{id}/reviews` - Post a review
/// - `GET /v1/achievements/me` - Unlocked achievements
///
/// ## Admin (bearer JWT with admin role)
/// - `POST /v1/games` - Add a catalog entry
/// - `GET /v1/admin/stats` - Platform counters
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Create concurrency-limited API routes
    let api_routes = Router::new()
        // Players
        .route("/players", post(players::register_player))
        .route("/players/me", get(players::get_me))
        // Wallet
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/credit", post(wallet::credit_wallet))
        // Purchases and library
        .route("/purchases", post(purchases::purchase_game))
        .route("/library", get(purchases::list_library))
        // Catalog
        .route("/games", get(games::list_games).post(games::create_game))
        .route("/games/featured", get(games::featured_games))
        .route("/games/:id", get(games::get_game))
        .route("/games/:id/reviews", post(reviews::post_review))
        // Achievements
        .route("/achievements", get(achievements::list_achievements))
        .route("/achievements/me", get(achievements::my_achievements))
        .route("/leaderboard", get(achievements::leaderboard))
        // Admin
        .route("/admin/stats", get(admin::stats))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // API v1 routes (rate limited)
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
