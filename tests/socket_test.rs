//! WebSocket session tests
//!
//! Sessions are driven over in-memory frame channels instead of real
//! sockets: the client side writes frames into an unbounded channel and
//! reads what the server pushed from another.

#[macro_use]
mod common;

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use futures_util::sink;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_stream::wrappers::UnboundedReceiverStream;

use common::{identity, registry};
use xfpresence::backend::messaging::deliver;
use xfpresence::backend::presence::{PresenceRegistry, UserIdentity};
use xfpresence::backend::realtime::drive_session;
use xfpresence::shared::{ChatMessage, DisconnectPolicy, EventType, RealtimeEvent};

struct TestClient {
    frames_in: mpsc::UnboundedSender<Result<Message, Infallible>>,
    frames_out: mpsc::UnboundedReceiver<Message>,
    session: JoinHandle<()>,
}

impl TestClient {
    fn connect(registry: &Arc<PresenceRegistry>, user: Option<&str>) -> Self {
        let (frames_in, incoming) = mpsc::unbounded_channel();
        let (outgoing, frames_out) = mpsc::unbounded_channel::<Message>();

        let sink = Box::pin(sink::unfold(outgoing, |tx, frame: Message| async move {
            tx.send(frame).map_err(|_| "client gone")?;
            Ok::<_, &'static str>(tx)
        }));
        let stream = UnboundedReceiverStream::new(incoming);
        let session = tokio::spawn(drive_session(
            sink,
            stream,
            Arc::clone(registry),
            UserIdentity::from_optional(user),
        ));

        Self {
            frames_in,
            frames_out,
            session,
        }
    }

    async fn next_event(&mut self) -> RealtimeEvent {
        loop {
            let frame = timeout(Duration::from_secs(2), self.frames_out.recv())
                .await
                .expect("timed out waiting for a frame")
                .expect("session ended");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("event JSON");
            }
        }
    }

    async fn close(self) {
        let _ = self.frames_in.send(Ok(Message::Close(None)));
        timeout(Duration::from_secs(2), self.session)
            .await
            .expect("session did not end")
            .expect("session panicked");
    }
}

#[tokio::test]
async fn test_sessions_broadcast_presence() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut alice = TestClient::connect(&registry, Some("alice"));
    assert_online!(alice.next_event().await, ["alice"]);

    let mut bob = TestClient::connect(&registry, Some("bob"));
    assert_online!(bob.next_event().await, ["alice", "bob"]);
    assert_online!(alice.next_event().await, ["alice", "bob"]);

    alice.close().await;
    assert_online!(bob.next_event().await, ["bob"]);
    assert_eq!(registry.lookup(&identity("alice")), None);

    bob.close().await;
    assert_eq!(registry.online_count(), 0);
}

#[tokio::test]
async fn test_anonymous_session_observes_without_appearing() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut observer = TestClient::connect(&registry, None);
    assert_online!(observer.next_event().await, []);

    let alice = TestClient::connect(&registry, Some("alice"));
    assert_online!(observer.next_event().await, ["alice"]);

    alice.close().await;
    assert_online!(observer.next_event().await, []);
    observer.close().await;
}

#[tokio::test]
async fn test_blank_user_id_is_anonymous() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut client = TestClient::connect(&registry, Some(""));
    assert_online!(client.next_event().await, []);
    assert_eq!(registry.online_count(), 0);
    client.close().await;
}

#[tokio::test]
async fn test_direct_message_reaches_online_session() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut bob = TestClient::connect(&registry, Some("bob"));
    assert_online!(bob.next_event().await, ["bob"]);

    let message = ChatMessage::new("alice", "bob", Some("hey bob".to_string()), None).unwrap();
    assert!(deliver(&registry, &message).unwrap());

    let event = bob.next_event().await;
    assert_eq!(event.event_type, EventType::NewMessage);
    assert_eq!(event.payload["text"], "hey bob");

    bob.close().await;
    assert!(!deliver(&registry, &message).unwrap());
}

#[tokio::test]
async fn test_reconnect_before_old_session_closes() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut first = TestClient::connect(&registry, Some("alice"));
    assert_online!(first.next_event().await, ["alice"]);
    let mut second = TestClient::connect(&registry, Some("alice"));
    assert_online!(second.next_event().await, ["alice"]);
    assert_online!(first.next_event().await, ["alice"]);

    first.close().await;
    assert_online!(second.next_event().await, ["alice"]);
    assert!(registry.lookup(&identity("alice")).is_some());

    second.close().await;
    assert_eq!(registry.online_count(), 0);
}

#[tokio::test]
async fn test_dropped_client_stream_ends_session() {
    let registry = registry(DisconnectPolicy::Conditional);

    let mut client = TestClient::connect(&registry, Some("alice"));
    assert_online!(client.next_event().await, ["alice"]);

    let TestClient {
        frames_in, session, ..
    } = client;
    drop(frames_in);

    timeout(Duration::from_secs(2), session)
        .await
        .expect("session did not end")
        .expect("session panicked");
    assert_eq!(registry.online_count(), 0);
}

#[tokio::test]
async fn test_failed_write_ends_session() {
    let registry = registry(DisconnectPolicy::Conditional);
    let (_frames_in, incoming) = mpsc::unbounded_channel::<Result<Message, Infallible>>();

    let broken = Box::pin(sink::unfold((), |_, _frame: Message| async move {
        Err::<(), _>("broken pipe")
    }));
    let session = tokio::spawn(drive_session(
        broken,
        UnboundedReceiverStream::new(incoming),
        Arc::clone(&registry),
        Some(identity("alice")),
    ));

    timeout(Duration::from_secs(2), session)
        .await
        .expect("session did not end")
        .expect("session panicked");
    assert_eq!(registry.online_count(), 0);
}
