/**
 * API Route Handlers
 *
 * # Routes
 *
 * - `GET /health` - Liveness probe with online count
 * - `GET /api/presence/online` - Online identities
 * - `POST /api/messages/send/{receiver_id}` - Live direct message
 *   (requires the `x-user-id` header set by the auth layer)
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::messaging::handlers::send_message;
use crate::backend::presence::api::{get_online_users, health};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/health", get(health))
        .route("/api/presence/online", get(get_online_users))
        .route("/api/messages/send/{receiver_id}", post(send_message))
}
