//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `WIDGET_HOST` - Bind address (default: 127.0.0.1)
//! - `WIDGET_PORT` - Listen port (default: 3000)
//! - `CART_SOURCE_URL` - Endpoint serving the cart payload (default: the CDN fixture)
//! - `CART_STORE_DIR` - Directory holding the snapshot slot (default: .)
//! - `CART_STORE_KEY` - Name of the snapshot slot (default: cartState)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::store::DEFAULT_KEY;

/// Default remote endpoint for the cart payload.
pub const DEFAULT_SOURCE_URL: &str =
    "https://cdn.shopify.com/s/files/1/0883/2188/4479/files/apiCartData.json?v=1728384889";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Endpoint fetched once at startup
    pub source_url: Url,
    /// Directory holding the snapshot slot
    pub store_dir: PathBuf,
    /// Snapshot slot name
    pub store_key: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get_or("WIDGET_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("WIDGET_HOST".to_string(), e.to_string()))?;
        let port = get_or("WIDGET_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("WIDGET_PORT".to_string(), e.to_string()))?;
        let source_url = Url::parse(&get_or("CART_SOURCE_URL", DEFAULT_SOURCE_URL)).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_SOURCE_URL".to_string(), e.to_string())
        })?;
        let store_dir = PathBuf::from(get_or("CART_STORE_DIR", "."));
        let store_key = get_or("CART_STORE_KEY", DEFAULT_KEY);
        if store_key.is_empty() || store_key.contains(['/', '\\']) {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORE_KEY".to_string(),
                "must be a non-empty file name".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            source_url,
            store_dir,
            store_key,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
