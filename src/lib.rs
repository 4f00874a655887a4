//! XFPresence - Chat Presence Server
//!
//! XFPresence is the real-time half of a small chat backend: it tracks which
//! authenticated users are connected right now, tells every connected client
//! whenever that set changes, and pushes direct messages to recipients that
//! are online.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and configuration
//!   - `RealtimeEvent` (`onlineUsers`, `newMessage`), `ChatMessage`
//!   - `AppConfig`, `DisconnectPolicy`
//!   - `SharedError`
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - `PresenceRegistry` and the per-connection lifecycle
//!   - WebSocket endpoint and broadcast fan-out
//!   - Live message delivery and HTTP routes
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfpresence::backend::server::{config::load_config, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config();
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, create_app(config)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Presence Semantics
//!
//! - One connection per identity; a reconnect replaces the previous entry
//! - Every connect/disconnect broadcasts the full online set, never a diff
//! - Presence is per process and in memory only

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
