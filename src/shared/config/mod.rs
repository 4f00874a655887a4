//! Application configuration module
//!
//! Provides the configuration types for the presence server: listen port,
//! allowed CORS origin, broadcast channel capacity and the disconnect policy
//! of the presence registry.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5001;

/// Default allowed browser origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Default capacity of the presence broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 1000;

/// How `Disconnect` treats an identity whose stored handle is not the
/// disconnecting one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Remove the entry only when the stored handle is the disconnecting handle.
    #[default]
    Conditional,
    /// Remove the entry by identity alone. A late disconnect from a replaced
    /// connection marks a reconnected user offline.
    Unconditional,
}

impl DisconnectPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Unconditional => "unconditional",
        }
    }
}

impl fmt::Display for DisconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisconnectPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conditional" => Ok(Self::Conditional),
            "unconditional" => Ok(Self::Unconditional),
            other => Err(ConfigError::InvalidValue {
                key: "PRESENCE_DISCONNECT_POLICY",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port the HTTP/WebSocket server listens on
    pub port: u16,
    /// Browser origin allowed by CORS
    pub cors_origin: String,
    /// Capacity of the presence broadcast channel
    pub broadcast_capacity: usize,
    /// Disconnect policy of the presence registry
    pub disconnect_policy: DisconnectPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            disconnect_policy: DisconnectPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: "0".to_string(),
            });
        }
        if self.broadcast_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "BROADCAST_CAPACITY",
                value: "0".to_string(),
            });
        }
        if self.cors_origin.trim().is_empty() {
            return Err(ConfigError::MissingValue("CORS_ORIGIN"));
        }
        // Credentialed CORS cannot be combined with a wildcard origin.
        if self.cors_origin.trim() == "*" {
            return Err(ConfigError::InvalidValue {
                key: "CORS_ORIGIN",
                value: self.cors_origin.clone(),
            });
        }
        Ok(())
    }

    /// Read configuration from environment variables
    ///
    /// Unset variables keep their defaults; set but malformed variables are
    /// an error.
    ///
    /// - `SERVER_PORT`
    /// - `CORS_ORIGIN`
    /// - `BROADCAST_CAPACITY`
    /// - `PRESENCE_DISCONNECT_POLICY` (`conditional` | `unconditional`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(port) = env_var("SERVER_PORT") {
            builder = builder.port(parse_value("SERVER_PORT", &port)?);
        }
        if let Some(origin) = env_var("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }
        if let Some(capacity) = env_var("BROADCAST_CAPACITY") {
            builder = builder.broadcast_capacity(parse_value("BROADCAST_CAPACITY", &capacity)?);
        }
        if let Some(policy) = env_var("PRESENCE_DISCONNECT_POLICY") {
            builder = builder.disconnect_policy(policy.parse()?);
        }

        builder.build()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    cors_origin: Option<String>,
    broadcast_capacity: Option<usize>,
    disconnect_policy: Option<DisconnectPolicy>,
}

impl AppConfigBuilder {
    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the allowed CORS origin
    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    /// Set the broadcast channel capacity
    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = Some(capacity);
        self
    }

    /// Set the disconnect policy
    pub fn disconnect_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.disconnect_policy = Some(policy);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            port: self.port.unwrap_or(defaults.port),
            cors_origin: self.cors_origin.unwrap_or(defaults.cors_origin),
            broadcast_capacity: self.broadcast_capacity.unwrap_or(defaults.broadcast_capacity),
            disconnect_policy: self.disconnect_policy.unwrap_or(defaults.disconnect_policy),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
