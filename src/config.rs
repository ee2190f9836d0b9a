//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Origin the browser frontend is served from.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

/// Filter used when verbose logging is on.
pub const VERBOSE_LOG_FILTER: &str = "switch_off_ai=debug,tower_http=debug,info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Single origin allowed to make cross-origin requests.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

fn default_allowed_origin() -> String {
    DEFAULT_ALLOWED_ORIGIN.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from `NAME=value` pairs.
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(AppError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if !(self.allowed_origin.starts_with("http://")
            || self.allowed_origin.starts_with("https://"))
        {
            return Err(AppError::InvalidConfig(
                "ALLOWED_ORIGIN must start with http:// or https://".to_string(),
            ));
        }

        self.origin_header()?;

        Ok(())
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Allowed origin as a header value for the CORS layer.
    pub fn origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(self.allowed_origin.trim_end_matches('/')).map_err(|e| {
            AppError::InvalidConfig(format!("ALLOWED_ORIGIN is not a valid header value: {e}"))
        })
    }

    /// Tracing filter directives: verbose wins over `RUST_LOG`.
    pub fn log_filter(&self) -> &str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            &self.rust_log
        }
    }
}
