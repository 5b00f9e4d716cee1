//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store`
//! trait on top of a pessimistic [`TransactionDB`]. Compound operations
//! (`purchase_game`, `credit_wallet`, `grant_achievement`) run as real
//! transactions: the rows they mutate are read with `get_for_update`,
//! which takes an exclusive row lock, and a second writer for the same row
//! queues behind the first until commit or rollback. Locks are released on
//! every exit path; dropping an uncommitted transaction rolls it back.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, Direction, ErrorKind, IteratorMode, MultiThreaded,
    Options, Transaction, TransactionDB, TransactionDBOptions, TransactionOptions, WriteOptions,
};

use gameverse_core::{
    AchievementGrant, AchievementId, Game, GameId, LeaderboardEntry, License, LicenseId, Player,
    PlayerId, Review,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::{PurchaseReceipt, Store, StoreStats};

/// How long a transaction waits for a contended row lock before giving up,
/// in milliseconds. A purchase holds the wallet lock for well under this.
const LOCK_TIMEOUT_MS: i64 = 5000;

type Db = TransactionDB<MultiThreaded>;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Db,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let txn_db_opts = TransactionDBOptions::default();

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = TransactionDB::open_cf_descriptors(&opts, &txn_db_opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Begin a pessimistic transaction with deadlock detection.
    fn begin(&self) -> Transaction<'_, Db> {
        let mut txn_opts = TransactionOptions::default();
        txn_opts.set_deadlock_detect(true);
        txn_opts.set_lock_timeout(LOCK_TIMEOUT_MS);
        self.db.transaction_opt(&WriteOptions::default(), &txn_opts)
    }

    /// Commit a transaction, mapping failures to `StoreError::Transaction`.
    fn commit(txn: Transaction<'_, Db>) -> Result<()> {
        txn.commit()
            .map_err(|e| StoreError::Transaction(e.to_string()))
    }

    /// Roll a transaction back, logging (but not surfacing) rollback
    /// failures. The row locks are released either way.
    fn rollback(txn: &Transaction<'_, Db>) {
        if let Err(e) = txn.rollback() {
            tracing::warn!(error = %e, "transaction rollback failed");
        }
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Count the index rows under a prefix.
    fn count_prefix(&self, cf_name: &str, prefix: &[u8]) -> Result<u64> {
        let cf = self.cf(cf_name)?;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, Direction::Forward));

        let mut count = 0;
        for item in iter {
            let (key, _) = item.map_err(db_err)?;
            if !key.starts_with(prefix) {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    /// Collect the license IDs a player owns, in purchase order, through
    /// the given transaction's view of the index.
    fn owned_license_ids_in_txn(
        txn: &Transaction<'_, Db>,
        cf_owns: &Arc<BoundColumnFamily<'_>>,
        player_id: &PlayerId,
    ) -> Result<Vec<LicenseId>> {
        let prefix = keys::owns_prefix(player_id);
        let iter = txn.iterator_cf(cf_owns, IteratorMode::From(&prefix, Direction::Forward));

        let mut ids = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(db_err)?;
            if !key.starts_with(&prefix) {
                break;
            }
            ids.push(keys::extract_license_id_from_owns_key(&key));
        }
        Ok(ids)
    }

    /// The transactional body of a purchase. Runs with the caller's
    /// transaction; the caller commits on `Ok` and rolls back on `Err`.
    fn purchase_in_txn(
        &self,
        txn: &Transaction<'_, Db>,
        player_id: &PlayerId,
        game_id: &GameId,
        price_cents: i64,
    ) -> Result<PurchaseReceipt> {
        let cf_players = self.cf(cf::PLAYERS)?;
        let cf_games = self.cf(cf::GAMES)?;
        let cf_licenses = self.cf(cf::LICENSES)?;
        let cf_license_games = self.cf(cf::LICENSE_GAMES)?;
        let cf_owns = self.cf(cf::PLAYER_LICENSES)?;

        // Exclusive lock on the wallet row. A concurrent purchase or credit
        // for the same player blocks here until this transaction resolves;
        // other players' rows are untouched.
        let player_key = keys::player_key(player_id);
        let raw = txn
            .get_for_update_cf(&cf_players, &player_key, true)
            .map_err(txn_err)?
            .ok_or_else(|| StoreError::NotFound {
                entity: "player",
                id: player_id.to_string(),
            })?;

        // A record that no longer decodes, or a negative stored balance,
        // means the ledger itself is damaged. Refuse to touch it.
        let mut player: Player = Self::deserialize(&raw).map_err(|_| StoreError::Corrupt {
            entity: "player",
            id: player_id.to_string(),
        })?;
        if player.wallet_balance_cents < 0 {
            return Err(StoreError::Corrupt {
                entity: "player",
                id: player_id.to_string(),
            });
        }

        // The entitlement link must point at a real catalog entry.
        let game_raw = txn
            .get_cf(&cf_games, keys::game_key(game_id))
            .map_err(txn_err)?;
        if game_raw.is_none() {
            return Err(StoreError::NotFound {
                entity: "game",
                id: game_id.to_string(),
            });
        }

        if player.wallet_balance_cents < price_cents {
            return Err(StoreError::InsufficientFunds {
                balance: player.wallet_balance_cents,
                required: price_cents,
            });
        }

        // First-purchase check reads through the transaction, before the
        // new ownership row lands, for a consistent snapshot.
        let first_purchase =
            Self::owned_license_ids_in_txn(txn, &cf_owns, player_id)?.is_empty();

        // Debit the wallet.
        player.wallet_balance_cents -= price_cents;
        player.updated_at = Utc::now();
        txn.put_cf(&cf_players, &player_key, Self::serialize(&player)?)
            .map_err(txn_err)?;

        // Mint the license with a price snapshot, then both entitlement
        // links, all inside the same transaction.
        let license = License::issue(price_cents, Utc::now());
        txn.put_cf(
            &cf_licenses,
            keys::license_key(&license.id),
            Self::serialize(&license)?,
        )
        .map_err(txn_err)?;
        txn.put_cf(
            &cf_license_games,
            keys::license_key(&license.id),
            game_id.as_bytes(),
        )
        .map_err(txn_err)?;
        txn.put_cf(&cf_owns, keys::owns_key(player_id, &license.id), [])
            .map_err(txn_err)?;

        Ok(PurchaseReceipt {
            license_id: license.id,
            new_balance_cents: player.wallet_balance_cents,
            first_purchase,
        })
    }
}

/// Map a plain database error.
fn db_err(e: rocksdb::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

/// Map an error raised inside a transaction. Lock contention and commit
/// conflicts surface as `Transaction` (the caller may retry); everything
/// else is a database fault.
fn txn_err(e: rocksdb::Error) -> StoreError {
    match e.kind() {
        ErrorKind::TimedOut | ErrorKind::Busy | ErrorKind::TryAgain | ErrorKind::Aborted => {
            StoreError::Transaction(e.to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Player Operations
    // =========================================================================

    fn put_player(&self, player: &Player) -> Result<()> {
        let cf = self.cf(cf::PLAYERS)?;
        let key = keys::player_key(&player.id);
        let value = Self::serialize(player)?;

        self.db.put_cf(&cf, key, value).map_err(db_err)?;

        Ok(())
    }

    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        let cf = self.cf(cf::PLAYERS)?;
        let key = keys::player_key(player_id);

        self.db
            .get_cf(&cf, key)
            .map_err(db_err)?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    // =========================================================================
    // Game Catalog Operations
    // =========================================================================

    fn put_game(&self, game: &Game) -> Result<()> {
        let cf = self.cf(cf::GAMES)?;
        let key = keys::game_key(&game.id);
        let value = Self::serialize(game)?;

        self.db.put_cf(&cf, key, value).map_err(db_err)?;

        Ok(())
    }

    fn get_game(&self, game_id: &GameId) -> Result<Option<Game>> {
        let cf = self.cf(cf::GAMES)?;
        let key = keys::game_key(game_id);

        self.db
            .get_cf(&cf, key)
            .map_err(db_err)?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_games(&self) -> Result<Vec<Game>> {
        let cf = self.cf(cf::GAMES)?;

        let mut games = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(db_err)?;
            games.push(Self::deserialize::<Game>(&value)?);
        }

        games.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(games)
    }

    fn recent_games(&self, limit: usize) -> Result<Vec<Game>> {
        let mut games = self.list_games()?;
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(limit);
        Ok(games)
    }

    // =========================================================================
    // License / Library Operations
    // =========================================================================

    fn get_license(&self, license_id: &LicenseId) -> Result<Option<License>> {
        let cf = self.cf(cf::LICENSES)?;
        let key = keys::license_key(license_id);

        self.db
            .get_cf(&cf, key)
            .map_err(db_err)?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn count_owned(&self, player_id: &PlayerId) -> Result<u64> {
        self.count_prefix(cf::PLAYER_LICENSES, &keys::owns_prefix(player_id))
    }

    fn owned_games(&self, player_id: &PlayerId) -> Result<Vec<Game>> {
        let cf_owns = self.cf(cf::PLAYER_LICENSES)?;
        let cf_license_games = self.cf(cf::LICENSE_GAMES)?;

        let prefix = keys::owns_prefix(player_id);
        let iter = self
            .db
            .iterator_cf(&cf_owns, IteratorMode::From(&prefix, Direction::Forward));

        let mut games = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(db_err)?;
            if !key.starts_with(&prefix) {
                break;
            }

            let license_id = keys::extract_license_id_from_owns_key(&key);
            let Some(game_id_raw) = self
                .db
                .get_cf(&cf_license_games, keys::license_key(&license_id))
                .map_err(db_err)?
            else {
                // The entitlement link is written in the same transaction
                // as the ownership row, so a dangling index entry means
                // corruption.
                return Err(StoreError::Corrupt {
                    entity: "license",
                    id: license_id.to_string(),
                });
            };

            let game_id_bytes: [u8; 16] =
                game_id_raw
                    .as_slice()
                    .try_into()
                    .map_err(|_| StoreError::Corrupt {
                        entity: "license",
                        id: license_id.to_string(),
                    })?;
            let game_id = GameId::from_uuid(uuid::Uuid::from_bytes(game_id_bytes));

            if let Some(game) = self.get_game(&game_id)? {
                games.push(game);
            }
        }

        games.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(games)
    }

    // =========================================================================
    // Wallet Operations
    // =========================================================================

    fn credit_wallet(&self, player_id: &PlayerId, amount_cents: i64) -> Result<i64> {
        if amount_cents <= 0 {
            return Err(StoreError::InvalidAmount(amount_cents));
        }

        let txn = self.begin();
        let cf_players = self.cf(cf::PLAYERS)?;
        let player_key = keys::player_key(player_id);

        // Same lock the purchase path takes, so credits serialize with
        // debits per player.
        let result = txn
            .get_for_update_cf(&cf_players, &player_key, true)
            .map_err(txn_err)
            .and_then(|raw| {
                raw.ok_or_else(|| StoreError::NotFound {
                    entity: "player",
                    id: player_id.to_string(),
                })
            })
            .and_then(|raw| Self::deserialize::<Player>(&raw))
            .and_then(|mut player| {
                player.wallet_balance_cents += amount_cents;
                player.updated_at = Utc::now();
                txn.put_cf(&cf_players, &player_key, Self::serialize(&player)?)
                    .map_err(txn_err)?;
                Ok(player.wallet_balance_cents)
            });

        match result {
            Ok(balance) => {
                Self::commit(txn)?;
                Ok(balance)
            }
            Err(err) => {
                Self::rollback(&txn);
                Err(err)
            }
        }
    }

    fn purchase_game(
        &self,
        player_id: &PlayerId,
        game_id: &GameId,
        price_cents: i64,
    ) -> Result<PurchaseReceipt> {
        let txn = self.begin();

        match self.purchase_in_txn(&txn, player_id, game_id, price_cents) {
            Ok(receipt) => {
                Self::commit(txn)?;
                Ok(receipt)
            }
            Err(err) => {
                Self::rollback(&txn);
                Err(err)
            }
        }
    }

    // =========================================================================
    // Achievement Operations
    // =========================================================================

    fn grant_achievement(
        &self,
        player_id: &PlayerId,
        achievement_id: AchievementId,
    ) -> Result<bool> {
        let txn = self.begin();
        let cf_grants = self.cf(cf::ACHIEVEMENT_GRANTS)?;
        let key = keys::grant_key(player_id, achievement_id);

        // Exclusive lock on the grant key makes the existence check and the
        // insert one atomic step, so duplicate concurrent triggers can't
        // both write.
        let existing = match txn.get_for_update_cf(&cf_grants, &key, true) {
            Ok(existing) => existing,
            Err(e) => {
                Self::rollback(&txn);
                return Err(txn_err(e));
            }
        };

        if existing.is_some() {
            Self::rollback(&txn);
            return Ok(false);
        }

        let grant = AchievementGrant::now(*player_id, achievement_id);
        let value = Self::serialize(&grant)?;
        if let Err(e) = txn.put_cf(&cf_grants, &key, value) {
            Self::rollback(&txn);
            return Err(txn_err(e));
        }

        Self::commit(txn)?;
        Ok(true)
    }

    fn list_grants(&self, player_id: &PlayerId) -> Result<Vec<AchievementGrant>> {
        let cf = self.cf(cf::ACHIEVEMENT_GRANTS)?;
        let prefix = keys::grant_prefix(player_id);
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        let mut grants = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(db_err)?;
            if !key.starts_with(&prefix) {
                break;
            }
            grants.push(Self::deserialize::<AchievementGrant>(&value)?);
        }

        grants.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
        Ok(grants)
    }

    fn achievement_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let cf_players = self.cf(cf::PLAYERS)?;

        // Every player is ranked, including those with no grants at all.
        let mut entries = Vec::new();
        for item in self.db.iterator_cf(&cf_players, IteratorMode::Start) {
            let (_, value) = item.map_err(db_err)?;
            let player: Player = Self::deserialize(&value)?;
            let unlocked = self.count_prefix(cf::ACHIEVEMENT_GRANTS, &keys::grant_prefix(&player.id))?;
            entries.push(LeaderboardEntry {
                first_name: player.first_name,
                last_name: player.last_name,
                achievements_unlocked: unlocked,
            });
        }

        entries.sort_by(|a, b| {
            b.achievements_unlocked
                .cmp(&a.achievements_unlocked)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        entries.truncate(limit);
        Ok(entries)
    }

    // =========================================================================
    // Review Operations
    // =========================================================================

    fn put_review(&self, review: &Review) -> Result<()> {
        let txn = self.begin();
        let cf_reviews = self.cf(cf::REVIEWS)?;
        let cf_by_game = self.cf(cf::REVIEWS_BY_GAME)?;
        let cf_by_player = self.cf(cf::REVIEWS_BY_PLAYER)?;

        let value = Self::serialize(review)?;
        let result = txn
            .put_cf(&cf_reviews, keys::review_key(&review.id), value)
            .and_then(|()| {
                txn.put_cf(
                    &cf_by_game,
                    keys::review_by_game_key(&review.game_id, &review.id),
                    [],
                )
            })
            .and_then(|()| {
                txn.put_cf(
                    &cf_by_player,
                    keys::review_by_player_key(&review.player_id, &review.id),
                    [],
                )
            });

        match result {
            Ok(()) => Self::commit(txn),
            Err(e) => {
                Self::rollback(&txn);
                Err(txn_err(e))
            }
        }
    }

    fn count_reviews_by_player(&self, player_id: &PlayerId) -> Result<u64> {
        self.count_prefix(cf::REVIEWS_BY_PLAYER, &keys::reviews_by_player_prefix(player_id))
    }

    fn list_reviews_for_game(&self, game_id: &GameId) -> Result<Vec<Review>> {
        let cf_index = self.cf(cf::REVIEWS_BY_GAME)?;
        let cf_reviews = self.cf(cf::REVIEWS)?;

        let prefix = keys::reviews_by_game_prefix(game_id);
        let iter = self
            .db
            .iterator_cf(&cf_index, IteratorMode::From(&prefix, Direction::Forward));

        let mut reviews = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(db_err)?;
            if !key.starts_with(&prefix) {
                break;
            }

            let review_id = keys::extract_review_id_from_index_key(&key);
            if let Some(raw) = self
                .db
                .get_cf(&cf_reviews, keys::review_key(&review_id))
                .map_err(db_err)?
            {
                reviews.push(Self::deserialize::<Review>(&raw)?);
            }
        }

        // ULID keys iterate oldest first; callers want newest first.
        reviews.reverse();
        Ok(reviews)
    }

    // =========================================================================
    // Stats
    // =========================================================================

    fn stats(&self) -> Result<StoreStats> {
        let count_all = |name: &str| -> Result<u64> {
            let cf = self.cf(name)?;
            let mut count = 0;
            for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
                item.map_err(db_err)?;
                count += 1;
            }
            Ok(count)
        };

        Ok(StoreStats {
            players: count_all(cf::PLAYERS)?,
            games: count_all(cf::GAMES)?,
            licenses_issued: count_all(cf::LICENSES)?,
        })
    }
}
