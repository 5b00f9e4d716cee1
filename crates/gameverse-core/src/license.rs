//! License types.
//!
//! A license is the immutable record of one purchased copy of a game. The
//! price is a snapshot taken at purchase time and is never recalculated.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::LicenseId;

/// How long a freshly issued license remains valid.
pub const LICENSE_VALIDITY_DAYS: i64 = 365;

/// An immutable license for one purchased copy of a game.
///
/// Licenses are produced exclusively by the purchase transaction and never
/// mutated afterwards. The links to the owning player and to the game are
/// stored separately and created in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    /// Unique license ID (ULID for time-ordering).
    pub id: LicenseId,

    /// Price paid in cents, snapshotted at purchase time.
    pub price_cents: i64,

    /// When the purchase was made.
    pub purchased_at: DateTime<Utc>,

    /// End of the validity window.
    pub valid_until: DateTime<Utc>,
}

impl License {
    /// Issue a new license with the standard one-year validity window.
    #[must_use]
    pub fn issue(price_cents: i64, purchased_at: DateTime<Utc>) -> Self {
        Self {
            id: LicenseId::generate(),
            price_cents,
            purchased_at,
            valid_until: purchased_at + Duration::days(LICENSE_VALIDITY_DAYS),
        }
    }

    /// Check whether the license is valid at the given instant.
    #[must_use]
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        at >= self.purchased_at && at < self.valid_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_sets_one_year_window() {
        let now = Utc::now();
        let license = License::issue(1999, now);

        assert_eq!(license.price_cents, 1999);
        assert_eq!(license.valid_until - license.purchased_at, Duration::days(365));
    }

    #[test]
    fn validity_window_bounds() {
        let now = Utc::now();
        let license = License::issue(0, now);

        assert!(license.is_valid_at(now));
        assert!(license.is_valid_at(now + Duration::days(364)));
        assert!(!license.is_valid_at(now + Duration::days(366)));
        assert!(!license.is_valid_at(now - Duration::seconds(1)));
    }
}
