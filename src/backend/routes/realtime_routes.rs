/**
 * Realtime Route Handlers
 *
 * - `GET /socket?userId=<id>` - WebSocket upgrade; one presence connection
 *   per socket
 */

use axum::{routing::get, Router};

use crate::backend::realtime::socket::handle_socket_upgrade;
use crate::backend::server::state::AppState;

pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/socket", get(handle_socket_upgrade))
}
