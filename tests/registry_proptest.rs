//! Property-based tests for the presence registry
//!
//! Random connect/disconnect sequences are replayed against a plain map
//! model; after every step the registry must agree with the model and must
//! have broadcast exactly one snapshot equal to its key set.

mod common;

use std::collections::BTreeMap;

use common::{drain_snapshots, names, registry};
use proptest::prelude::*;
use xfpresence::backend::presence::{ConnectionHandle, UserIdentity};
use xfpresence::shared::DisconnectPolicy;

const IDENTITIES: [&str; 3] = ["alice", "bob", "carol"];

#[derive(Debug, Clone)]
enum Op {
    /// Open a new connection for an identity
    Connect(usize),
    /// Close one of the identity's connections, oldest first when `stale`
    Disconnect { user: usize, stale: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDENTITIES.len()).prop_map(Op::Connect),
        (0..IDENTITIES.len(), any::<bool>()).prop_map(|(user, stale)| Op::Disconnect { user, stale }),
    ]
}

fn policy_strategy() -> impl Strategy<Value = DisconnectPolicy> {
    prop_oneof![
        Just(DisconnectPolicy::Conditional),
        Just(DisconnectPolicy::Unconditional),
    ]
}

proptest! {
    #[test]
    fn registry_matches_model(
        policy in policy_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let registry = registry(policy);
        let mut events = registry.subscribe();

        // Connections each identity has opened and not yet closed, oldest first.
        let mut open: Vec<Vec<ConnectionHandle>> = vec![Vec::new(); IDENTITIES.len()];
        let mut model: BTreeMap<String, ConnectionHandle> = BTreeMap::new();
        let mut receivers = Vec::new();

        for op in ops {
            let snapshot = match op {
                Op::Connect(user) => {
                    let (h, rx) = ConnectionHandle::channel();
                    receivers.push(rx);
                    open[user].push(h.clone());
                    model.insert(IDENTITIES[user].to_string(), h.clone());
                    registry.connect(Some(&UserIdentity::new(IDENTITIES[user])), &h)
                }
                Op::Disconnect { user, stale } => {
                    let id = UserIdentity::new(IDENTITIES[user]);
                    if open[user].is_empty() {
                        let (h, _rx) = ConnectionHandle::channel();
                        registry.disconnect(Some(&id), &h)
                    } else {
                        let h = if stale { open[user].remove(0) } else { open[user].pop().unwrap() };
                        let remove = match policy {
                            DisconnectPolicy::Unconditional => true,
                            DisconnectPolicy::Conditional => model.get(id.as_str()) == Some(&h),
                        };
                        if remove {
                            model.remove(id.as_str());
                        }
                        registry.disconnect(Some(&id), &h)
                    }
                }
            };

            let expected: Vec<String> = model.keys().cloned().collect();
            prop_assert_eq!(&names(&snapshot), &expected);
            prop_assert_eq!(drain_snapshots(&mut events), vec![expected.clone()]);

            for name in IDENTITIES {
                let id = UserIdentity::new(name);
                let found = registry.lookup(&id);
                prop_assert_eq!(found.as_ref(), model.get(name));
            }
        }
    }

    #[test]
    fn repeated_disconnect_changes_nothing(extra in 1usize..5) {
        let registry = registry(DisconnectPolicy::Conditional);
        let (h, _rx) = ConnectionHandle::channel();
        let alice = UserIdentity::new("alice");

        registry.connect(Some(&alice), &h);
        let first = registry.disconnect(Some(&alice), &h);
        for _ in 0..extra {
            prop_assert_eq!(registry.disconnect(Some(&alice), &h), first.clone());
        }
        prop_assert!(registry.lookup(&alice).is_none());
    }
}
