//! Real-time Update Module
//!
//! Pushes events to connected clients over WebSockets.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs        - Module exports and documentation
//! ├── broadcast.rs  - Broadcast channel type and helper
//! └── socket.rs     - WebSocket endpoint and session loop
//! ```
//!
//! # Event Types
//!
//! - `onlineUsers` - full online snapshot, sent to every open connection
//! - `newMessage` - direct message, sent to one recipient's connection

/// Event broadcasting utilities
pub mod broadcast;

/// WebSocket session handler
pub mod socket;

pub use broadcast::{broadcast_event, RealtimeEventBroadcast};
pub use socket::{drive_session, handle_socket_upgrade, ConnectQuery};
