/**
 * Real-time Event Broadcasting
 *
 * Events are broadcast using `tokio::sync::broadcast`, a multi-producer,
 * multi-consumer channel. Every open connection holds a receiver and gets a
 * copy of each event. Receivers that fall behind by more than the channel
 * capacity skip the oldest events.
 */

use tokio::sync::broadcast;

use crate::shared::RealtimeEvent;

/// Broadcast channel carrying events to every open connection
///
/// ```rust
/// use tokio::sync::broadcast;
/// use xfpresence::backend::realtime::RealtimeEventBroadcast;
///
/// let (tx, _) = broadcast::channel(1000);
/// let _broadcast: RealtimeEventBroadcast = tx;
/// ```
pub type RealtimeEventBroadcast = broadcast::Sender<RealtimeEvent>;

/// Broadcast a real-time event to all subscribers
///
/// Never blocks. Returns the number of subscribers the event was queued for
/// (0 if there are none, which is not an error).
pub fn broadcast_event(broadcast_tx: &RealtimeEventBroadcast, event: RealtimeEvent) -> usize {
    let event_name = event.event_type.as_str().to_string();
    match broadcast_tx.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!(
                "[Realtime] {} broadcast to {} subscribers",
                event_name,
                subscriber_count
            );
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No subscribers to receive {}", event_name);
            0
        }
    }
}
