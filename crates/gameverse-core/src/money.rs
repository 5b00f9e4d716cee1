//! Money conversion helpers.
//!
//! Balances and prices are stored as `i64` integer cents to avoid floating
//! point precision drift. API requests carry decimal currency amounts
//! (e.g. `19.99`); the helpers here validate and convert them once, at the
//! boundary.

use serde::Serialize;

/// Upper bound on a single request amount, in cents (10 million dollars).
///
/// Rejecting absurd amounts here keeps the arithmetic comfortably inside
/// `i64` range no matter how balances accumulate.
pub const MAX_AMOUNT_CENTS: i64 = 1_000_000_000;

/// Errors produced when converting a decimal request amount to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountError {
    /// The amount is NaN or infinite.
    #[error("amount is not a finite number")]
    NotFinite,

    /// The amount is zero or negative where a positive amount is required.
    #[error("amount must be positive")]
    NotPositive,

    /// The amount is negative where a non-negative amount is required.
    #[error("amount must not be negative")]
    Negative,

    /// The amount exceeds the platform cap.
    #[error("amount exceeds the maximum allowed")]
    TooLarge,
}

/// Convert a decimal currency amount to cents, requiring `amount > 0`.
///
/// Used for wallet credits, where a zero or negative top-up is a caller
/// error.
///
/// # Errors
///
/// Returns `AmountError` if the amount is non-finite, non-positive, or
/// above [`MAX_AMOUNT_CENTS`].
pub fn credit_cents(amount: f64) -> Result<i64, AmountError> {
    if !amount.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if amount <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    to_cents(amount)
}

/// Convert a decimal price to cents, requiring `price >= 0`.
///
/// Used for purchase prices and catalog list prices, where zero is a valid
/// (free) price.
///
/// # Errors
///
/// Returns `AmountError` if the price is non-finite, negative, or above
/// [`MAX_AMOUNT_CENTS`].
pub fn price_cents(price: f64) -> Result<i64, AmountError> {
    if !price.is_finite() {
        return Err(AmountError::NotFinite);
    }
    if price < 0.0 {
        return Err(AmountError::Negative);
    }
    to_cents(price)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_cents(amount: f64) -> Result<i64, AmountError> {
    let cents = (amount * 100.0).round();
    if cents > MAX_AMOUNT_CENTS as f64 {
        return Err(AmountError::TooLarge);
    }
    Ok(cents as i64)
}

/// Format cents as a dollar string, e.g. `1999` → `"$19.99"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_cents(cents: i64) -> String {
    format!("${:.2}", cents as f64 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_accepts_positive_decimals() {
        assert_eq!(credit_cents(25.0), Ok(2500));
        assert_eq!(credit_cents(0.01), Ok(1));
        assert_eq!(credit_cents(19.99), Ok(1999));
    }

    #[test]
    fn credit_rejects_zero_and_negative() {
        assert_eq!(credit_cents(0.0), Err(AmountError::NotPositive));
        assert_eq!(credit_cents(-5.0), Err(AmountError::NotPositive));
    }

    #[test]
    fn credit_rejects_non_finite() {
        assert_eq!(credit_cents(f64::NAN), Err(AmountError::NotFinite));
        assert_eq!(credit_cents(f64::INFINITY), Err(AmountError::NotFinite));
    }

    #[test]
    fn price_accepts_zero() {
        assert_eq!(price_cents(0.0), Ok(0));
        assert_eq!(price_cents(19.99), Ok(1999));
    }

    #[test]
    fn price_rejects_negative() {
        assert_eq!(price_cents(-0.01), Err(AmountError::Negative));
    }

    #[test]
    fn amounts_above_cap_rejected() {
        assert_eq!(credit_cents(20_000_000.0), Err(AmountError::TooLarge));
    }

    #[test]
    fn format_cents_renders_dollars() {
        assert_eq!(format_cents(3001), "$30.01");
        assert_eq!(format_cents(0), "$0.00");
    }
}
