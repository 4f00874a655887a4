//! Shared Module
//!
//! This module contains the types that cross the wire or are shared between
//! the presence core and the HTTP layer: real-time events, direct messages,
//! error types and application configuration.
//!
//! All types here are plain data and compile without the `ssr` feature.

/// Direct message data structure
pub mod message;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DisconnectPolicy};
pub use error::SharedError;
pub use event::{EventType, RealtimeEvent};
pub use message::ChatMessage;
