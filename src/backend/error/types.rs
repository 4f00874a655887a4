/**
 * Backend Error Types
 *
 * This module defines error types specific to the presence server.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised while processing HTTP requests: missing identity header, bad
 * request bodies.
 *
 * ## State Errors
 *
 * Raised when shared server state cannot be used as expected.
 *
 * ## Transition Errors
 *
 * Raised when a connection is driven through an illegal lifecycle step,
 * for example opening a connection twice.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::presence::ConnectionState;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// ```rust
/// use xfpresence::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::UNAUTHORIZED, "Missing identity");
/// assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing headers, invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// State management error
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Illegal connection lifecycle step
    #[error("Invalid connection transition from {from} to {to}")]
    TransitionError {
        /// State the connection was in
        from: ConnectionState,
        /// State that was requested
        to: ConnectionState,
    },

    /// Error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Create a new lifecycle transition error
    pub fn transition(from: ConnectionState, to: ConnectionState) -> Self {
        Self::TransitionError { from, to }
    }

    /// Get the HTTP status code for this error
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StateError`, `TransitionError`, `SerializationError` - 500
    /// - `SharedError` - 400 for validation, 500 for serialization
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TransitionError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
