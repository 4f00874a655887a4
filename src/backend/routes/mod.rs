//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Main router creation and layers
//! ├── realtime_routes.rs  - WebSocket endpoint
//! └── api_routes.rs       - Presence, messaging and health endpoints
//! ```

/// Main router creation
pub mod router;

/// Realtime routes
pub mod realtime_routes;

/// API routes
pub mod api_routes;

pub use router::create_router;
