/**
 * Connection Lifecycle
 *
 * Each transport session walks `Connecting -> Open -> Closed` exactly once.
 * The identity, if any, is attached to the registry on the `Open`
 * transition and detached on `Closed`. A session abandoned before it opened
 * goes straight from `Connecting` to `Closed` without touching the registry.
 */

use std::fmt;

use crate::backend::error::BackendError;
use crate::backend::presence::handle::{ConnectionHandle, UserIdentity};
use crate::backend::presence::registry::PresenceRegistry;

/// Lifecycle state of one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        })
    }
}

/// One transport session as seen by the presence core
#[derive(Debug)]
pub struct Connection {
    identity: Option<UserIdentity>,
    handle: ConnectionHandle,
    state: ConnectionState,
}

impl Connection {
    pub fn new(identity: Option<UserIdentity>, handle: ConnectionHandle) -> Self {
        Self {
            identity,
            handle,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }

    /// `Connecting -> Open`: register with the registry
    ///
    /// Returns the online snapshot broadcast by the registry.
    pub fn open(&mut self, registry: &PresenceRegistry) -> Result<Vec<UserIdentity>, BackendError> {
        if self.state != ConnectionState::Connecting {
            return Err(BackendError::transition(self.state, ConnectionState::Open));
        }
        let snapshot = registry.connect(self.identity.as_ref(), &self.handle);
        self.state = ConnectionState::Open;
        Ok(snapshot)
    }

    /// `Open -> Closed` or `Connecting -> Closed`
    ///
    /// Only an open connection deregisters; returns the broadcast snapshot in
    /// that case and `None` for a connection that never opened.
    pub fn close(
        &mut self,
        registry: &PresenceRegistry,
    ) -> Result<Option<Vec<UserIdentity>>, BackendError> {
        match self.state {
            ConnectionState::Open => {
                let snapshot = registry.disconnect(self.identity.as_ref(), &self.handle);
                self.state = ConnectionState::Closed;
                Ok(Some(snapshot))
            }
            ConnectionState::Connecting => {
                self.state = ConnectionState::Closed;
                Ok(None)
            }
            ConnectionState::Closed => Err(BackendError::transition(
                ConnectionState::Closed,
                ConnectionState::Closed,
            )),
        }
    }
}
