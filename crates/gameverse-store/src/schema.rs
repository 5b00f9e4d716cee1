//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Player records, keyed by `player_id`.
    pub const PLAYERS: &str = "players";

    /// Game catalog entries, keyed by `game_id`.
    pub const GAMES: &str = "games";

    /// License records, keyed by `license_id` (ULID).
    pub const LICENSES: &str = "licenses";

    /// Entitlement link: license to game, keyed by `license_id`.
    /// Value is the 16-byte `game_id`.
    pub const LICENSE_GAMES: &str = "license_games";

    /// Ownership link: player to license, keyed by
    /// `player_id || license_id`. Value is empty (index only).
    pub const PLAYER_LICENSES: &str = "player_licenses";

    /// Achievement grants, keyed by `player_id || achievement_id`.
    pub const ACHIEVEMENT_GRANTS: &str = "achievement_grants";

    /// Review records, keyed by `review_id` (ULID).
    pub const REVIEWS: &str = "reviews";

    /// Index: reviews by game, keyed by `game_id || review_id`.
    /// Value is empty (index only).
    pub const REVIEWS_BY_GAME: &str = "reviews_by_game";

    /// Index: reviews by author, keyed by `player_id || review_id`.
    /// Value is empty (index only).
    pub const REVIEWS_BY_PLAYER: &str = "reviews_by_player";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::PLAYERS,
        cf::GAMES,
        cf::LICENSES,
        cf::LICENSE_GAMES,
        cf::PLAYER_LICENSES,
        cf::ACHIEVEMENT_GRANTS,
        cf::REVIEWS,
        cf::REVIEWS_BY_GAME,
        cf::REVIEWS_BY_PLAYER,
    ]
}
