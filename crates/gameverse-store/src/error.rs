//! Error types for GameVerse storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was missing.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// Insufficient funds for a wallet debit.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance in cents.
        balance: i64,
        /// Required amount in cents.
        required: i64,
    },

    /// A wallet credit was attempted with a non-positive amount.
    #[error("invalid credit amount: {0}")]
    InvalidAmount(i64),

    /// A stored record failed an integrity check. This should never occur.
    #[error("corrupt {entity} record: {id}")]
    Corrupt {
        /// The kind of record that failed the check.
        entity: &'static str,
        /// The identifier of the corrupt record.
        id: String,
    },

    /// A transaction could not be completed (lock contention, commit
    /// failure). The whole operation rolled back and is safe to retry.
    #[error("transaction failed: {0}")]
    Transaction(String),
}
