//! Player account types for GameVerse.
//!
//! This module defines the player record including the wallet balance and
//! the platform role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// A player account.
///
/// The account tracks the wallet balance (in cents) alongside profile data.
/// The balance is only ever mutated by the store's wallet operations and is
/// never negative at a committed state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// The player ID.
    pub id: PlayerId,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Contact email.
    pub email: String,

    /// Platform role.
    pub role: Role,

    /// Current wallet balance in cents.
    /// 1 credit = $0.01 = 1 cent.
    pub wallet_balance_cents: i64,

    /// When the player registered.
    pub joined_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with an empty wallet.
    #[must_use]
    pub fn new(id: PlayerId, first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name,
            last_name,
            email,
            role: Role::User,
            wallet_balance_cents: 0,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Check if the wallet covers a debit of `amount_cents`.
    #[must_use]
    pub const fn has_sufficient_funds(&self, amount_cents: i64) -> bool {
        self.wallet_balance_cents >= amount_cents
    }

    /// Check if the player holds the admin capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Platform role attached to a principal.
///
/// Role-gated operations check this typed value rather than inspecting raw
/// token payloads at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular player.
    User,

    /// Platform administrator (catalog mutation, stats).
    Admin,
}

impl Role {
    /// Get the role name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}
