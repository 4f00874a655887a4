/**
 * Server Initialization
 *
 * Builds the application state and router.
 *
 * # Initialization Process
 *
 * 1. Create the presence registry from configuration
 * 2. Wrap it in `AppState`
 * 3. Create and configure the router
 *
 * The registry lives as long as the returned router; it is empty on every
 * start since presence is never persisted.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub fn create_app(config: AppConfig) -> Router<()> {
    let (app, _) = create_app_with_state(config);
    app
}

/// Create the application and hand back its state
///
/// Used by callers that need to reach the registry directly, such as tests
/// and embedders that deliver messages outside HTTP.
pub fn create_app_with_state(config: AppConfig) -> (Router<()>, AppState) {
    tracing::info!("[Server] Initializing presence server");

    let app_state = AppState::new(config);
    tracing::info!(
        "[Server] Presence registry ready (disconnect policy {}, capacity {})",
        app_state.config.disconnect_policy,
        app_state.config.broadcast_capacity
    );

    let app = create_router(app_state.clone());
    (app, app_state)
}
