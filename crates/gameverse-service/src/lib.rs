//! GameVerse HTTP API Service.
//!
//! This crate provides the HTTP API for the GameVerse platform, including:
//!
//! - Player profiles and wallet top-ups
//! - Game catalog
//! - Purchase transactions (the wallet debit / license mint path)
//! - Reviews
//! - Achievements and the leaderboard
//!
//! # Authentication
//!
//! Requests carry a bearer JWT (HS256). The extractor turns it into a typed
//! principal with the player id and role; admin-only handlers check the
//! role capability explicitly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Static handlers stay async for consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
