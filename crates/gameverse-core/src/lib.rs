//! Core types and utilities for GameVerse.
//!
//! This crate provides the foundational types used throughout the GameVerse
//! platform:
//!
//! - **Identifiers**: `PlayerId`, `GameId`, `LicenseId`, `ReviewId`
//! - **Players**: `Player`, `Role`
//! - **Catalog**: `Game`
//! - **Licenses**: `License`
//! - **Achievements**: `Achievement`, `AchievementGrant`, `LeaderboardEntry`
//! - **Reviews**: `Review`
//! - **Money**: decimal-to-cents conversion helpers
//!
//! # Currency Unit
//!
//! **1 credit = $0.01 (1 cent)**
//!
//! - A $50.00 top-up credits 5000 cents
//! - A $19.99 game debits 1999 cents
//! - Stored as `i64` (integer cents) to avoid floating point precision issues

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod achievement;
pub mod game;
pub mod ids;
pub mod license;
pub mod money;
pub mod player;
pub mod review;

pub use achievement::{
    catalog, definition, Achievement, AchievementGrant, AchievementId, LeaderboardEntry,
    FIRST_PURCHASE, FIRST_REVIEW,
};
pub use game::Game;
pub use ids::{GameId, IdError, LicenseId, PlayerId, ReviewId};
pub use license::{License, LICENSE_VALIDITY_DAYS};
pub use money::{credit_cents, format_cents, price_cents, AmountError, MAX_AMOUNT_CENTS};
pub use player::{Player, Role};
pub use review::Review;
