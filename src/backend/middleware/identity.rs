/**
 * Verified Identity Extraction
 *
 * Credentials are checked by the auth service in front of this server,
 * which forwards the verified user id in the `x-user-id` header. This module
 * turns that header into a `VerifiedUser` for handlers.
 */

use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};

use crate::backend::error::BackendError;
use crate::backend::presence::UserIdentity;

/// Header carrying the identity verified upstream
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller, as verified by the auth layer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedUser(pub UserIdentity);

/// Read the verified identity from request headers
pub fn extract_verified_user(parts: &Parts) -> Result<VerifiedUser, BackendError> {
    let raw = parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok());

    UserIdentity::from_optional(raw)
        .map(VerifiedUser)
        .ok_or_else(|| {
            tracing::warn!("[Server] Missing {} header", USER_ID_HEADER);
            BackendError::handler(StatusCode::UNAUTHORIZED, "Unauthorized - no verified user")
        })
}

impl<S> FromRequestParts<S> for VerifiedUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_verified_user(parts)
    }
}
