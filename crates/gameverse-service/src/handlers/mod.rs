//! API handlers.

pub mod achievements;
pub mod admin;
pub mod games;
pub mod health;
pub mod players;
pub mod purchases;
pub mod reviews;
pub mod wallet;
