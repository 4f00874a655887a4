//! Messaging Module
//!
//! This module handles live delivery of direct messages to online users.

pub mod handlers;

pub use handlers::{deliver, send_message, SendMessageRequest, SendMessageResponse};
