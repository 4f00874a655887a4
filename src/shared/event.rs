/**
 * Real-time Event System
 *
 * This module defines the events pushed to connected clients. Every event
 * is a JSON text frame carrying an event name, a payload and a timestamp.
 *
 * - `onlineUsers` carries the full list of online identities. Clients must
 *   replace their local view with it, never merge.
 * - `newMessage` carries a `ChatMessage` delivered live to its recipient.
 */
use serde::{Deserialize, Serialize};

use crate::shared::message::ChatMessage;

/// Type of real-time event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    /// Full snapshot of the online identity set
    #[serde(rename = "onlineUsers")]
    OnlineUsers,
    /// Direct message pushed to a recipient
    #[serde(rename = "newMessage")]
    NewMessage,
    /// Custom event type
    #[serde(untagged)]
    Custom(String),
}

impl EventType {
    /// Wire name of the event
    pub fn as_str(&self) -> &str {
        match self {
            Self::OnlineUsers => "onlineUsers",
            Self::NewMessage => "newMessage",
            Self::Custom(name) => name.as_str(),
        }
    }
}

/// Real-time event that can be pushed to one or all connections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred (RFC3339)
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an `onlineUsers` snapshot event
    pub fn online_users<S: AsRef<str>>(identities: &[S]) -> Self {
        let payload = identities
            .iter()
            .map(|id| serde_json::Value::String(id.as_ref().to_string()))
            .collect();
        Self::new(EventType::OnlineUsers, serde_json::Value::Array(payload))
    }

    /// Create a `newMessage` event for a direct message
    pub fn new_message(message: &ChatMessage) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventType::NewMessage, serde_json::to_value(message)?))
    }

    /// Identities carried by an `onlineUsers` event, `None` for other events
    pub fn online_identities(&self) -> Option<Vec<String>> {
        if self.event_type != EventType::OnlineUsers {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}
