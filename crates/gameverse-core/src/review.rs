//! Review types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GameId, PlayerId, ReviewId};

/// A player's review of a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID (ULID for time-ordering).
    pub id: ReviewId,

    /// The game being reviewed.
    pub game_id: GameId,

    /// The author.
    pub player_id: PlayerId,

    /// The author's experience with the game.
    pub experience: String,

    /// Free-form feedback.
    pub feedback: String,

    /// Whether and to whom the author recommends the game.
    pub recommendation: String,

    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review stamped with the current time.
    #[must_use]
    pub fn new(
        game_id: GameId,
        player_id: PlayerId,
        experience: String,
        feedback: String,
        recommendation: String,
    ) -> Self {
        Self {
            id: ReviewId::generate(),
            game_id,
            player_id,
            experience,
            feedback,
            recommendation,
            created_at: Utc::now(),
        }
    }
}
