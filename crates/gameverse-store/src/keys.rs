//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions for encoding and decoding keys used in
//! column families. Composite keys concatenate fixed-width identifier
//! bytes, so prefix iteration over the first component yields all rows for
//! that component.

use gameverse_core::{AchievementId, GameId, LicenseId, PlayerId, ReviewId};

/// Create a player key from a player ID.
#[must_use]
pub fn player_key(player_id: &PlayerId) -> Vec<u8> {
    player_id.as_bytes().to_vec()
}

/// Create a game key from a game ID.
#[must_use]
pub fn game_key(game_id: &GameId) -> Vec<u8> {
    game_id.as_bytes().to_vec()
}

/// Create a license key from a license ID.
#[must_use]
pub fn license_key(license_id: &LicenseId) -> Vec<u8> {
    license_id.to_bytes().to_vec()
}

/// Create an ownership index key.
///
/// Format: `player_id (16 bytes) || license_id (16 bytes)`
///
/// Since ULIDs are time-ordered, a player's licenses iterate in purchase
/// order.
#[must_use]
pub fn owns_key(player_id: &PlayerId, license_id: &LicenseId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(player_id.as_bytes());
    key.extend_from_slice(&license_id.to_bytes());
    key
}

/// Create a prefix for iterating all licenses owned by a player.
#[must_use]
pub fn owns_prefix(player_id: &PlayerId) -> Vec<u8> {
    player_id.as_bytes().to_vec()
}

/// Extract the license ID from an ownership index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_license_id_from_owns_key(key: &[u8]) -> LicenseId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    LicenseId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create an achievement grant key.
///
/// Format: `player_id (16 bytes) || achievement_id (4 bytes, big-endian)`
#[must_use]
pub fn grant_key(player_id: &PlayerId, achievement_id: AchievementId) -> Vec<u8> {
    let mut key = Vec::with_capacity(20);
    key.extend_from_slice(player_id.as_bytes());
    key.extend_from_slice(&achievement_id.to_be_bytes());
    key
}

/// Create a prefix for iterating all grants for a player.
#[must_use]
pub fn grant_prefix(player_id: &PlayerId) -> Vec<u8> {
    player_id.as_bytes().to_vec()
}

/// Create a review key from a review ID.
#[must_use]
pub fn review_key(review_id: &ReviewId) -> Vec<u8> {
    review_id.to_bytes().to_vec()
}

/// Create a review-by-game index key.
///
/// Format: `game_id (16 bytes) || review_id (16 bytes)`
#[must_use]
pub fn review_by_game_key(game_id: &GameId, review_id: &ReviewId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(game_id.as_bytes());
    key.extend_from_slice(&review_id.to_bytes());
    key
}

/// Create a prefix for iterating all reviews of a game.
#[must_use]
pub fn reviews_by_game_prefix(game_id: &GameId) -> Vec<u8> {
    game_id.as_bytes().to_vec()
}

/// Extract the review ID from a review index key.
///
/// # Panics
///
/// Panics if the key is not at least 32 bytes.
#[must_use]
pub fn extract_review_id_from_index_key(key: &[u8]) -> ReviewId {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&key[16..32]);
    ReviewId::from_bytes(bytes).expect("valid ULID bytes")
}

/// Create a review-by-author index key.
///
/// Format: `player_id (16 bytes) || review_id (16 bytes)`
#[must_use]
pub fn review_by_player_key(player_id: &PlayerId, review_id: &ReviewId) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(player_id.as_bytes());
    key.extend_from_slice(&review_id.to_bytes());
    key
}

/// Create a prefix for iterating all reviews written by a player.
#[must_use]
pub fn reviews_by_player_prefix(player_id: &PlayerId) -> Vec<u8> {
    player_id.as_bytes().to_vec()
}
