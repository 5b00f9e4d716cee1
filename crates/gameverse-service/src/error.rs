//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use gameverse_core::AmountError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden - valid credentials but insufficient permissions.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Insufficient wallet funds.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance in cents.
        balance: i64,
        /// Required amount in cents.
        required: i64,
    },

    /// A storage transaction failed after rolling back; the request can be
    /// retried as a whole.
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string(), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::InsufficientFunds { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_funds",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::TransactionFailed(msg) => {
                tracing::error!(error = %msg, "Storage transaction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "transaction_failed",
                    "The operation could not be completed; please retry".to_string(),
                    None,
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<gameverse_store::StoreError> for ApiError {
    fn from(err: gameverse_store::StoreError) -> Self {
        match err {
            gameverse_store::StoreError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} not found: {id}"))
            }
            gameverse_store::StoreError::InsufficientFunds { balance, required } => {
                Self::InsufficientFunds { balance, required }
            }
            gameverse_store::StoreError::InvalidAmount(amount) => {
                Self::BadRequest(format!("invalid amount: {amount}"))
            }
            gameverse_store::StoreError::Transaction(msg) => Self::TransactionFailed(msg),
            gameverse_store::StoreError::Corrupt { entity, id } => {
                Self::Internal(format!("corrupt {entity} record: {id}"))
            }
            gameverse_store::StoreError::Database(msg)
            | gameverse_store::StoreError::Serialization(msg) => Self::Internal(msg),
        }
    }
}

impl From<AmountError> for ApiError {
    fn from(err: AmountError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
