/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router and applies
 * the cross-cutting layers (CORS, request tracing).
 *
 * # Route Order
 *
 * 1. Realtime routes (WebSocket endpoint)
 * 2. API routes (presence, messages, health)
 * 3. Fallback handler (404)
 */

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config.cors_origin);

    let router = configure_realtime_routes(Router::new());
    let router = configure_api_routes(router);

    let router = router.fallback(|| async {
        BackendError::handler(axum::http::StatusCode::NOT_FOUND, "Not Found")
    });

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request());

    // A wildcard origin may not carry credentials.
    if origin.trim() == "*" {
        tracing::warn!("[Server] CORS origin is \"*\", credentials disabled");
        return layer.allow_origin(AllowOrigin::any());
    }

    let layer = layer.allow_credentials(true);
    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!("[Server] Ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}
