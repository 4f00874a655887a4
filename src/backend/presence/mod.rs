//! Presence Module
//!
//! Tracks which users are connected right now and tells every connected
//! client whenever that set changes.
//!
//! # Module Structure
//!
//! ```text
//! presence/
//! ├── mod.rs         - Module exports and documentation
//! ├── handle.rs      - UserIdentity, ConnectionId, ConnectionHandle
//! ├── registry.rs    - PresenceRegistry (connect/disconnect/lookup/broadcast)
//! ├── connection.rs  - Per-connection lifecycle state machine
//! └── api.rs         - Read-only HTTP views
//! ```
//!
//! # Flow
//!
//! 1. The socket endpoint builds a [`Connection`] in `Connecting`.
//! 2. `open` registers the identity and broadcasts `onlineUsers`.
//! 3. The message path uses [`PresenceRegistry::lookup`] for live delivery.
//! 4. `close` deregisters and broadcasts `onlineUsers` again.

/// Connection identity and push handles
pub mod handle;

/// The presence registry
pub mod registry;

/// Connection lifecycle
pub mod connection;

/// HTTP views of the registry
pub mod api;

pub use connection::{Connection, ConnectionState};
pub use handle::{ConnectionHandle, ConnectionId, UserIdentity};
pub use registry::PresenceRegistry;
