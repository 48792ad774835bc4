//! Centralized error handling.
//!
//! Every fallible operation in the crate returns [`AppError`]. Each variant
//! belongs to exactly one [`ErrorKind`], and the HTTP status is derived from
//! the kind alone so callers never have to inspect message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy shared by the domain, services and storage adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed or policy-violating input, detected before persistence.
    Validation,
    /// Entity absent or owned by another user.
    NotFound,
    /// Token or credential failure.
    Auth,
    /// Infrastructure failure outside the storage engine.
    Internal,
    /// Persistence failure.
    Database,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "VALIDATION_ERROR"),
            ErrorKind::NotFound => write!(f, "NOT_FOUND"),
            ErrorKind::Auth => write!(f, "AUTH_ERROR"),
            ErrorKind::Internal => write!(f, "INTERNAL_ERROR"),
            ErrorKind::Database => write!(f, "DATABASE_ERROR"),
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Authentication
    #[error("{0}")]
    Auth(String),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Persistence
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Storage I/O error")]
    Storage(#[from] std::io::Error),

    #[error("Storage encoding error")]
    Encoding(#[from] serde_json::Error),

    // Internal
    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Kind of this error, the only input to status mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Auth(_) | AppError::Jwt(_) => ErrorKind::Auth,
            AppError::Database(_) | AppError::Storage(_) | AppError::Encoding(_) => {
                ErrorKind::Database
            }
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Check the kind without matching on variants.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == kind
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Database | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Encoding(e) => {
                tracing::error!("Storage encoding error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.kind().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(message))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        AppError::Auth(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
