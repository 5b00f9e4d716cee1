//! Game catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::GameId;

/// A catalog entry for a purchasable game.
///
/// Catalog entries are created by admin principals and are read-only input
/// to the purchase path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// The game ID.
    pub id: GameId,

    /// Display title.
    pub title: String,

    /// Genre label (e.g. "RPG", "Strategy").
    pub genre: String,

    /// Editorial rating, 0.0 to 5.0.
    pub rating: f32,

    /// List price in cents.
    pub price_cents: i64,

    /// Optional cover image URL.
    pub image_url: Option<String>,

    /// When the entry was added to the catalog.
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Create a new catalog entry.
    #[must_use]
    pub fn new(
        title: String,
        genre: String,
        rating: f32,
        price_cents: i64,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id: GameId::generate(),
            title,
            genre,
            rating,
            price_cents,
            image_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_gets_fresh_id() {
        let a = Game::new("Nebula Drift".into(), "Racing".into(), 4.5, 1999, None);
        let b = Game::new("Nebula Drift".into(), "Racing".into(), 4.5, 1999, None);
        assert_ne!(a.id, b.id);
        assert_eq!(a.price_cents, 1999);
    }
}
