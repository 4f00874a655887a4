/**
 * Application State Management
 *
 * `AppState` is the central state container for the Axum application. It
 * owns the presence registry and the configuration the server was started
 * with. The `FromRef` implementations let handlers extract just the part
 * they need.
 *
 * ```rust,ignore
 * use std::sync::Arc;
 * use axum::extract::State;
 * use xfpresence::backend::presence::PresenceRegistry;
 *
 * async fn handler(State(registry): State<Arc<PresenceRegistry>>) {
 *     let online = registry.online_users();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::presence::PresenceRegistry;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// The presence registry
    ///
    /// Constructed once in `create_app` and shared by the socket endpoint
    /// and the message-delivery path.
    pub registry: Arc<PresenceRegistry>,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state and its registry from configuration
    pub fn new(config: AppConfig) -> Self {
        let registry = PresenceRegistry::new(config.disconnect_policy, config.broadcast_capacity);
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<PresenceRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
