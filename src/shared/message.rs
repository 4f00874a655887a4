/**
 * Direct Message Data Structure
 *
 * A `ChatMessage` is what the message-delivery path pushes to a recipient
 * whose connection is live. Messages are not stored; if the recipient is
 * offline the message is simply reported as not delivered.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// A single direct message between two users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Server-assigned message id
    pub id: Uuid,
    /// Identity of the author
    pub sender_id: String,
    /// Identity of the recipient
    pub receiver_id: String,
    /// Text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image reference (URL produced by an upload service)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message, rejecting empty parties and empty bodies
    ///
    /// Blank `text`/`image` values are normalised to `None`. At least one of
    /// them must remain.
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        text: Option<String>,
        image: Option<String>,
    ) -> Result<Self, SharedError> {
        let sender_id = sender_id.into();
        let receiver_id = receiver_id.into();

        if sender_id.trim().is_empty() {
            return Err(SharedError::validation("sender_id", "must not be empty"));
        }
        if receiver_id.trim().is_empty() {
            return Err(SharedError::validation("receiver_id", "must not be empty"));
        }

        let text = text.filter(|t| !t.trim().is_empty());
        let image = image.filter(|i| !i.trim().is_empty());
        if text.is_none() && image.is_none() {
            return Err(SharedError::validation(
                "text",
                "message must have text or an image",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            text,
            image,
            created_at: Utc::now(),
        })
    }
}
