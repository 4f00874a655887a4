//! Messaging HTTP Handlers
//!
//! Live delivery of direct messages. The sender comes from the verified
//! identity header; the recipient is resolved through the presence registry
//! and, if online, gets a `newMessage` event on its connection. Nothing is
//! stored: an offline recipient simply means `delivered: false`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::middleware::VerifiedUser;
use crate::backend::presence::{PresenceRegistry, UserIdentity};
use crate::shared::{ChatMessage, RealtimeEvent};

/// Body of `POST /api/messages/send/{receiver_id}`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response of `POST /api/messages/send/{receiver_id}`
#[derive(Debug, Deserialize, Serialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    /// Whether the recipient had a live connection the message was pushed to
    pub delivered: bool,
}

/// Send a direct message (POST /api/messages/send/{receiver_id})
pub async fn send_message(
    State(registry): State<Arc<PresenceRegistry>>,
    VerifiedUser(sender): VerifiedUser,
    Path(receiver_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), BackendError> {
    let message = ChatMessage::new(
        sender.as_str(),
        receiver_id.as_str(),
        request.text,
        request.image,
    )?;

    let delivered = deliver(&registry, &message)?;

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse { message, delivered }),
    ))
}

/// Push `message` to its recipient if the recipient is online
pub fn deliver(registry: &PresenceRegistry, message: &ChatMessage) -> Result<bool, BackendError> {
    let recipient = UserIdentity::new(message.receiver_id.as_str());

    let Some(handle) = registry.lookup(&recipient) else {
        tracing::debug!("[Messages] {} offline, message {} not pushed", recipient, message.id);
        return Ok(false);
    };

    let delivered = handle.send(RealtimeEvent::new_message(message)?);
    tracing::debug!(
        "[Messages] {} -> {} on {} (delivered: {})",
        message.sender_id,
        recipient,
        handle.id(),
        delivered
    );
    Ok(delivered)
}
