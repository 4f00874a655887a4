//! Backend Module
//!
//! Server-side code for the presence server: an Axum HTTP/WebSocket server
//! that tracks which users are connected and pushes presence snapshots and
//! direct messages to them.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── presence/       - Presence registry and connection lifecycle
//! ├── realtime/       - Broadcast channel and WebSocket sessions
//! ├── messaging/      - Live direct-message delivery
//! ├── middleware/     - Verified identity extraction
//! ├── routes/         - Route configuration
//! ├── server/         - State, configuration, initialization
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds one `Arc<PresenceRegistry>`, created at startup and
//! handed to every handler through `FromRef`. There is no global state.
//!
//! # Thread Safety
//!
//! - The registry guards its map with a single `parking_lot::Mutex`; no
//!   lock is held across an `.await`
//! - Presence snapshots fan out through `tokio::sync::broadcast`
//! - Direct messages go through each connection's `mpsc` queue

/// Presence registry and connection lifecycle
#[cfg(feature = "ssr")]
pub mod presence;

/// Real-time update system
#[cfg(feature = "ssr")]
pub mod realtime;

/// Direct message delivery
#[cfg(feature = "ssr")]
pub mod messaging;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use presence::{Connection, ConnectionHandle, ConnectionState, PresenceRegistry, UserIdentity};
#[cfg(feature = "ssr")]
pub use server::create_app;
