//! Common test utilities and helpers
//!
//! - Registry and handle fixtures
//! - Draining helpers for broadcast receivers
//! - Custom assertion macros

#![allow(dead_code, unused_macros)]

use std::sync::Arc;

use tokio::sync::broadcast;
use xfpresence::backend::presence::{ConnectionHandle, PresenceRegistry, UserIdentity};
use xfpresence::shared::{DisconnectPolicy, RealtimeEvent};

/// Registry with room for every event a test produces
pub fn registry(policy: DisconnectPolicy) -> Arc<PresenceRegistry> {
    Arc::new(PresenceRegistry::new(policy, 4096))
}

pub fn identity(name: &str) -> UserIdentity {
    UserIdentity::new(name)
}

/// A fresh handle whose receiver is kept alive by the caller
pub fn handle() -> (ConnectionHandle, tokio::sync::mpsc::Receiver<RealtimeEvent>) {
    ConnectionHandle::channel()
}

/// Every `onlineUsers` payload already queued on `rx`
pub fn drain_snapshots(rx: &mut broadcast::Receiver<RealtimeEvent>) -> Vec<Vec<String>> {
    std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|event| event.online_identities())
        .collect()
}

pub fn names(identities: &[UserIdentity]) -> Vec<String> {
    identities.iter().map(|id| id.as_str().to_string()).collect()
}

/// Assert that a result is ok and return the value
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that an `onlineUsers` event carries exactly `expected`
macro_rules! assert_online {
    ($event:expr, [$($name:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$($name.to_string()),*];
        assert_eq!($event.online_identities(), Some(expected));
    }};
}
