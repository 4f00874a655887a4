//! Middleware Module
//!
//! Request-processing helpers shared by the HTTP handlers.
//!
//! - **`identity`** - `VerifiedUser` extractor for the identity forwarded by
//!   the upstream auth service

/// Verified identity extraction
pub mod identity;

pub use identity::{VerifiedUser, USER_ID_HEADER};
