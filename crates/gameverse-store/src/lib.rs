//! `RocksDB` storage layer for GameVerse.
//!
//! This crate provides persistent storage for players, games, licenses,
//! achievement grants, and reviews using a pessimistic `RocksDB`
//! [`TransactionDB`](rocksdb::TransactionDB). The transactional backend is
//! what gives the purchase path its guarantees: the wallet row is read
//! under an exclusive lock, the debit and the license rows commit as one
//! atomic unit, and every failure path rolls back completely.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `players`: player records (wallet balance lives here)
//! - `games`: catalog entries
//! - `licenses`: immutable license records, keyed by ULID
//! - `license_games`: entitlement link, license to game
//! - `player_licenses`: ownership link, player to license (index)
//! - `achievement_grants`: one-time unlock records
//! - `reviews`, `reviews_by_game`, `reviews_by_player`: reviews + indexes
//!
//! # Example
//!
//! ```no_run
//! use gameverse_store::{RocksStore, Store};
//! use gameverse_core::{Player, PlayerId};
//!
//! let store = RocksStore::open("/tmp/gameverse-db").unwrap();
//!
//! let player = Player::new(
//!     PlayerId::generate(),
//!     "Ada".into(),
//!     "Lovelace".into(),
//!     "ada@example.com".into(),
//! );
//! store.put_player(&player).unwrap();
//!
//! let balance = store.credit_wallet(&player.id, 5000).unwrap();
//! assert_eq!(balance, 5000);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;

use serde::{Deserialize, Serialize};

use gameverse_core::{
    AchievementGrant, AchievementId, Game, GameId, LeaderboardEntry, License, LicenseId, Player,
    PlayerId, Review,
};

/// The outcome of a committed purchase transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// The license minted by the purchase.
    pub license_id: LicenseId,

    /// Wallet balance after the debit, in cents.
    pub new_balance_cents: i64,

    /// Whether this was the player's first purchase, observed inside the
    /// transaction before the ownership row was written.
    pub first_purchase: bool,
}

/// Platform-wide counters for the admin stats endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoreStats {
    /// Total registered players.
    pub players: u64,

    /// Total catalog entries.
    pub games: u64,

    /// Total licenses ever issued.
    pub licenses_issued: u64,
}

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g. `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Player Operations
    // =========================================================================

    /// Insert or update a player record.
    ///
    /// This is for profile data only. Wallet balances are mutated
    /// exclusively by [`Store::credit_wallet`] and [`Store::purchase_game`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_player(&self, player: &Player) -> Result<()>;

    /// Get a player by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    // =========================================================================
    // Game Catalog Operations
    // =========================================================================

    /// Insert or update a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_game(&self, game: &Game) -> Result<()>;

    /// Get a game by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_game(&self, game_id: &GameId) -> Result<Option<Game>>;

    /// List the whole catalog, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_games(&self) -> Result<Vec<Game>>;

    /// List the most recently added games, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn recent_games(&self, limit: usize) -> Result<Vec<Game>>;

    // =========================================================================
    // License / Library Operations
    // =========================================================================

    /// Get a license by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_license(&self, license_id: &LicenseId) -> Result<Option<License>>;

    /// Count the licenses a player owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_owned(&self, player_id: &PlayerId) -> Result<u64>;

    /// List the games a player owns, ordered by title.
    ///
    /// Repeat purchases of the same game produce one entry per license.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn owned_games(&self, player_id: &PlayerId) -> Result<Vec<Game>>;

    // =========================================================================
    // Wallet Operations
    // =========================================================================

    /// Credit a player's wallet and return the new balance.
    ///
    /// Runs in its own transaction with an exclusive lock on the player
    /// row, so concurrent credits and purchases serialize per player.
    ///
    /// # Errors
    ///
    /// - `StoreError::InvalidAmount` if `amount_cents` is not positive.
    /// - `StoreError::NotFound` if the player doesn't exist.
    fn credit_wallet(&self, player_id: &PlayerId, amount_cents: i64) -> Result<i64>;

    /// Execute a purchase as one atomic transaction.
    ///
    /// Acquires an exclusive lock on the player's wallet row, verifies the
    /// game exists and funds cover the price, debits the wallet, mints a
    /// license with a snapshot of the price, and writes both entitlement
    /// links. Either everything commits or nothing does.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the player or game doesn't exist.
    /// - `StoreError::InsufficientFunds` if the balance is too low.
    /// - `StoreError::Corrupt` if the stored balance fails its integrity
    ///   check.
    /// - `StoreError::Transaction` if the commit or lock acquisition fails;
    ///   the purchase rolled back and can be retried.
    fn purchase_game(
        &self,
        player_id: &PlayerId,
        game_id: &GameId,
        price_cents: i64,
    ) -> Result<PurchaseReceipt>;

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    /// Grant an achievement to a player, at most once.
    ///
    /// Returns `true` if the grant was written, `false` if the player
    /// already held the achievement. Safe under concurrent duplicate
    /// triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn grant_achievement(&self, player_id: &PlayerId, achievement_id: AchievementId)
        -> Result<bool>;

    /// List a player's grants, most recent unlock first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_grants(&self, player_id: &PlayerId) -> Result<Vec<AchievementGrant>>;

    /// Compute the achievement leaderboard.
    ///
    /// Every player appears, including those with zero grants. Ordered by
    /// grant count descending, then first name ascending, truncated to
    /// `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn achievement_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;

    // =========================================================================
    // Review Operations
    // =========================================================================

    /// Insert a review and its indexes atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_review(&self, review: &Review) -> Result<()>;

    /// Count the reviews a player has written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_reviews_by_player(&self, player_id: &PlayerId) -> Result<u64>;

    /// List the reviews for a game, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_reviews_for_game(&self, game_id: &GameId) -> Result<Vec<Review>>;

    // =========================================================================
    // Stats
    // =========================================================================

    /// Platform-wide counters for the admin dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn stats(&self) -> Result<StoreStats>;
}
