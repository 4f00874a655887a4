//! Presence HTTP Handlers
//!
//! Read-only views of the registry for clients that are not holding a socket.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::backend::presence::{PresenceRegistry, UserIdentity};

/// Get the online identities (GET /api/presence/online)
pub async fn get_online_users(
    State(registry): State<Arc<PresenceRegistry>>,
) -> Json<Vec<UserIdentity>> {
    Json(registry.online_users())
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub online: usize,
}

/// Liveness probe (GET /health)
pub async fn health(State(registry): State<Arc<PresenceRegistry>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        online: registry.online_count(),
    })
}
