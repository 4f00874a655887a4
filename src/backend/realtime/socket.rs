/**
 * WebSocket Session Handler
 *
 * This module implements the `/socket` endpoint. Each upgraded socket is one
 * connection lifecycle in the presence registry.
 *
 * # Handshake
 *
 * The identity comes from the `userId` query parameter, already verified by
 * the auth layer in front of this server. A missing or blank value opens an
 * anonymous connection: it receives `onlineUsers` snapshots but does not
 * appear in them.
 *
 * ```http
 * GET /socket?userId=alice HTTP/1.1
 * Upgrade: websocket
 * ```
 *
 * # Frames
 *
 * The server pushes JSON text frames (`onlineUsers`, `newMessage`). Frames
 * sent by the client are ignored; a close frame, a read error or a failed
 * write ends the session.
 */

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::error::BackendError;
use crate::backend::presence::{Connection, ConnectionHandle, PresenceRegistry, UserIdentity};
use crate::shared::RealtimeEvent;

/// Query parameters of the socket handshake
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Handle socket upgrade (GET /socket?userId=...)
pub async fn handle_socket_upgrade(
    State(registry): State<Arc<PresenceRegistry>>,
    Query(query): Query<ConnectQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let identity = UserIdentity::from_optional(query.user_id.as_deref());
    tracing::debug!(
        "[Socket] Upgrade requested (identity: {})",
        identity.as_ref().map(|id| id.as_str()).unwrap_or("anonymous")
    );
    ws.on_upgrade(move |socket| run_connection(socket, registry, identity))
}

/// Run one upgraded socket until it closes
pub async fn run_connection(
    socket: WebSocket,
    registry: Arc<PresenceRegistry>,
    identity: Option<UserIdentity>,
) {
    let (sink, stream) = socket.split();
    drive_session(sink, stream, registry, identity).await;
}

/// Drive a session over any frame sink/stream pair
///
/// Opens the connection in the registry, pumps broadcast and direct events
/// out to the client, and closes the connection once the client goes away.
pub async fn drive_session<S, R, E>(
    mut sink: S,
    mut stream: R,
    registry: Arc<PresenceRegistry>,
    identity: Option<UserIdentity>,
) where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: fmt::Display,
{
    let (handle, mut direct) = ConnectionHandle::channel();
    let connection_id = handle.id();

    // Subscribe first so the snapshot produced by our own open reaches us.
    let mut events = registry.subscribe();
    let mut connection = Connection::new(identity, handle);

    if let Err(e) = connection.open(&registry) {
        tracing::error!("[Socket] Failed to open connection {}: {}", connection_id, e);
        return;
    }
    tracing::info!(
        "[Socket] Connection {} open (identity: {})",
        connection_id,
        connection.identity().map(|id| id.as_str()).unwrap_or("anonymous")
    );

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("[Socket] Read error on {}: {}", connection_id, e);
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(event) => {
                    if let Err(e) = forward(&mut sink, &event).await {
                        tracing::debug!("[Socket] {} gone: {}", connection_id, e);
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Socket] {} lagged, skipped {} events", connection_id, skipped);
                }
                Err(RecvError::Closed) => break,
            },
            Some(event) = direct.recv() => {
                if let Err(e) = forward(&mut sink, &event).await {
                    tracing::debug!("[Socket] {} gone: {}", connection_id, e);
                    break;
                }
            }
        }
    }

    if let Err(e) = connection.close(&registry) {
        tracing::error!("[Socket] Failed to close connection {}: {}", connection_id, e);
    }
    if let Err(e) = sink.close().await {
        tracing::debug!("[Socket] {} close failed: {}", connection_id, e);
    }
    tracing::info!("[Socket] Connection {} closed", connection_id);
}

async fn forward<S>(sink: &mut S, event: &RealtimeEvent) -> Result<(), BackendError>
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    let json = serde_json::to_string(event)?;
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|e| BackendError::state(format!("socket write failed: {}", e)))
}
