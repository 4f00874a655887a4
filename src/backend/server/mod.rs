//! Server Module
//!
//! Server-side setup: application state, configuration loading and app
//! creation.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use xfpresence::backend::server::{config::load_config, create_app};
//!
//! # async fn example() {
//! let app = create_app(load_config());
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_state};
pub use state::AppState;
