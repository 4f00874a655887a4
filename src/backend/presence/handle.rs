/**
 * Connection Identity and Handles
 *
 * A `ConnectionHandle` is the registry's view of one live session: an id
 * plus the sending half of the session's outbound queue. The socket task
 * owns the receiving half and the socket itself, so dropping the session
 * closes the queue and any later send through a stale handle fails quietly.
 */

use std::fmt;

use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Authenticated principal attached to a connection
///
/// The value is opaque and not validated here. Empty strings are treated as
/// "no identity" by [`UserIdentity::from_optional`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity from handshake metadata; missing or blank means anonymous
    pub fn from_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserIdentity {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique id of one transport session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Events a session may have queued for direct delivery before new ones are dropped
pub const DIRECT_QUEUE_CAPACITY: usize = 64;

/// Push channel to one connected client
///
/// Cloning a handle does not extend the session: equality is by connection
/// id only.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::Sender<RealtimeEvent>,
}

impl ConnectionHandle {
    /// Create a handle and the receiving end its session task drains
    pub fn channel() -> (Self, mpsc::Receiver<RealtimeEvent>) {
        Self::with_capacity(DIRECT_QUEUE_CAPACITY)
    }

    /// Like [`ConnectionHandle::channel`] with a custom queue bound
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<RealtimeEvent>) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                id: ConnectionId::new(),
                outbound,
            },
            rx,
        )
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Push an event to this client
    ///
    /// Returns `false` if the session has already gone away or its queue
    /// is full; the event is dropped in both cases. Never blocks.
    pub fn send(&self, event: RealtimeEvent) -> bool {
        match self.outbound.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("[Presence] Queue full on {}, dropping event", self.id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("[Presence] Dropped event for closed connection {}", self.id);
                false
            }
        }
    }

    /// Whether the session task is still draining this handle
    pub fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}
