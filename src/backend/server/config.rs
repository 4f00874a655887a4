/**
 * Server Configuration
 *
 * Loads the server configuration from the environment (after reading a
 * `.env` file if present).
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. A
 * malformed environment falls back to the default configuration.
 */

use crate::shared::AppConfig;

/// Load configuration, falling back to defaults on error
///
/// ```rust,no_run
/// use xfpresence::backend::server::config::load_config;
///
/// let config = load_config();
/// println!("listening on {}", config.port);
/// ```
pub fn load_config() -> AppConfig {
    if dotenv::dotenv().is_ok() {
        tracing::debug!("[Server] Loaded .env file");
    }

    match AppConfig::from_env() {
        Ok(config) => {
            tracing::info!(
                "[Server] Configuration loaded (port {}, disconnect policy {})",
                config.port,
                config.disconnect_policy
            );
            config
        }
        Err(e) => {
            tracing::error!("[Server] Invalid configuration: {}", e);
            tracing::warn!("[Server] Falling back to default configuration");
            AppConfig::default()
        }
    }
}
