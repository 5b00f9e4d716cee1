//! Achievement catalog and grant types.
//!
//! Achievement definitions are static reference data compiled into the
//! binary. Grants are one-time unlock records written by the grant hook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::PlayerId;

/// A well-known achievement definition identifier.
///
/// Ids are small integers so the trigger sites can name them as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(pub u32);

/// Granted the first time a player posts a review.
pub const FIRST_REVIEW: AchievementId = AchievementId(1);

/// Granted the first time a player completes a purchase.
pub const FIRST_PURCHASE: AchievementId = AchievementId(3);

impl AchievementId {
    /// Return the id as big-endian bytes, for store key encoding.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A static achievement definition.
///
/// Definitions are compiled in and only ever serialized out, so the
/// display strings stay borrowed.
#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    /// The achievement ID.
    pub id: AchievementId,

    /// Short display name.
    pub name: &'static str,

    /// What the player did to unlock it.
    pub description: &'static str,
}

/// The built-in achievement catalog, ordered by name.
#[must_use]
pub fn catalog() -> Vec<Achievement> {
    let mut all = vec![
        Achievement {
            id: FIRST_REVIEW,
            name: "Community Voice",
            description: "Post your first review.",
        },
        Achievement {
            id: AchievementId(2),
            name: "Window Shopper",
            description: "Browse the full catalog.",
        },
        Achievement {
            id: FIRST_PURCHASE,
            name: "First Purchase",
            description: "Buy your first game.",
        },
        Achievement {
            id: AchievementId(4),
            name: "Collector",
            description: "Own five games at once.",
        },
    ];
    all.sort_by(|a, b| a.name.cmp(b.name));
    all
}

/// Look up a definition by id.
#[must_use]
pub fn definition(id: AchievementId) -> Option<Achievement> {
    catalog().into_iter().find(|a| a.id == id)
}

/// A one-time unlock record tying a player to an achievement.
///
/// Unique per (player, achievement) pair; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementGrant {
    /// The player who unlocked the achievement.
    pub player_id: PlayerId,

    /// Which achievement was unlocked.
    pub achievement_id: AchievementId,

    /// When it was unlocked.
    pub unlocked_at: DateTime<Utc>,
}

impl AchievementGrant {
    /// Create a grant stamped with the current time.
    #[must_use]
    pub fn now(player_id: PlayerId, achievement_id: AchievementId) -> Self {
        Self {
            player_id,
            achievement_id,
            unlocked_at: Utc::now(),
        }
    }
}

/// One row of the achievement leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player first name.
    pub first_name: String,

    /// Player last name.
    pub last_name: String,

    /// Number of achievements the player has unlocked.
    pub achievements_unlocked: u64,
}
