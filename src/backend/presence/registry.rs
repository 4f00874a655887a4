/**
 * Presence Registry
 *
 * Maps each online `UserIdentity` to the handle of its live connection and
 * publishes the full online set to every open connection after each
 * mutation.
 *
 * # Consistency
 *
 * One mutex guards the map. A mutation, the snapshot of the key set and the
 * publish onto the broadcast channel happen under the same lock, so every
 * `onlineUsers` event is the exact post-mutation key set and events leave
 * in mutation order. Publishing only enqueues onto a
 * `tokio::sync::broadcast` channel; no I/O happens under the lock.
 *
 * # Delivery
 *
 * Every open connection subscribes to the broadcast channel, anonymous ones
 * included. Slow subscribers lag and skip events; there is no backpressure
 * on the registry.
 */

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::backend::presence::handle::{ConnectionHandle, UserIdentity};
use crate::backend::realtime::broadcast::{broadcast_event, RealtimeEventBroadcast};
use crate::shared::{DisconnectPolicy, RealtimeEvent};

/// Process-wide table of online users
///
/// Constructed once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct PresenceRegistry {
    online: Mutex<BTreeMap<UserIdentity, ConnectionHandle>>,
    events: RealtimeEventBroadcast,
    policy: DisconnectPolicy,
}

impl PresenceRegistry {
    /// Create an empty registry with a broadcast channel of `capacity`
    pub fn new(policy: DisconnectPolicy, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            online: Mutex::new(BTreeMap::new()),
            events,
            policy,
        }
    }

    pub fn policy(&self) -> DisconnectPolicy {
        self.policy
    }

    /// Receive every event broadcast from now on
    ///
    /// A session subscribes before it connects so that it sees the snapshot
    /// its own `connect` produces.
    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.events.subscribe()
    }

    /// Number of receivers currently attached to the broadcast channel
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    /// Record `identity` as online on `handle` and broadcast the online set
    ///
    /// An absent identity leaves the map untouched; the snapshot is still
    /// broadcast. An existing entry for the identity is replaced.
    ///
    /// Returns the snapshot that was broadcast.
    pub fn connect(
        &self,
        identity: Option<&UserIdentity>,
        handle: &ConnectionHandle,
    ) -> Vec<UserIdentity> {
        let mut online = self.online.lock();

        match identity {
            Some(identity) => {
                if let Some(previous) = online.insert(identity.clone(), handle.clone()) {
                    if previous != *handle {
                        tracing::info!(
                            "[Presence] {} reconnected on {}, replacing {}",
                            identity,
                            handle.id(),
                            previous.id()
                        );
                    }
                } else {
                    tracing::info!("[Presence] {} online on {}", identity, handle.id());
                }
            }
            None => {
                tracing::debug!("[Presence] Anonymous connection {} opened", handle.id());
            }
        }

        self.publish_locked(&online)
    }

    /// Remove `identity`'s entry and broadcast the online set
    ///
    /// Under [`DisconnectPolicy::Conditional`] the entry is removed only if it
    /// still points at `handle`, so a late disconnect from a replaced
    /// connection leaves the reconnected user online. Under
    /// [`DisconnectPolicy::Unconditional`] the entry is removed whatever
    /// handle it holds.
    ///
    /// Disconnecting an identity with no entry is a no-op apart from the
    /// broadcast. Returns the snapshot that was broadcast.
    pub fn disconnect(
        &self,
        identity: Option<&UserIdentity>,
        handle: &ConnectionHandle,
    ) -> Vec<UserIdentity> {
        let mut online = self.online.lock();

        if let Some(identity) = identity {
            let remove = match (self.policy, online.get(identity)) {
                (_, None) => false,
                (DisconnectPolicy::Unconditional, Some(_)) => true,
                (DisconnectPolicy::Conditional, Some(current)) => current == handle,
            };

            if remove {
                online.remove(identity);
                tracing::info!("[Presence] {} offline ({} closed)", identity, handle.id());
            } else if online.contains_key(identity) {
                tracing::debug!(
                    "[Presence] Ignoring stale disconnect of {} from {}",
                    identity,
                    handle.id()
                );
            }
        } else {
            tracing::debug!("[Presence] Anonymous connection {} closed", handle.id());
        }

        self.publish_locked(&online)
    }

    /// Current handle for `identity`, if it is online
    pub fn lookup(&self, identity: &UserIdentity) -> Option<ConnectionHandle> {
        self.online.lock().get(identity).cloned()
    }

    /// Sorted list of online identities
    pub fn online_users(&self) -> Vec<UserIdentity> {
        self.online.lock().keys().cloned().collect()
    }

    /// Number of online identities
    pub fn online_count(&self) -> usize {
        self.online.lock().len()
    }

    /// Send `event` to every open connection
    ///
    /// Returns the number of subscribers the event was queued for.
    pub fn broadcast(&self, event: RealtimeEvent) -> usize {
        // Serialised with mutations so snapshots and ad-hoc events keep one order.
        let _online = self.online.lock();
        broadcast_event(&self.events, event)
    }

    fn publish_locked(&self, online: &BTreeMap<UserIdentity, ConnectionHandle>) -> Vec<UserIdentity> {
        let snapshot: Vec<UserIdentity> = online.keys().cloned().collect();
        broadcast_event(&self.events, RealtimeEvent::online_users(&snapshot));
        snapshot
    }
}
