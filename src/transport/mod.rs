//! HTTP transport layer.
//!
//! Owns the `reqwest::Client` and its timeout policy: a bounded connect phase
//! and no overall or read deadline, so an open event stream may run as long as
//! the server keeps it alive.

pub mod http;

pub use http::HttpTransport;

use std::env;
use std::time::Duration;
use tracing::warn;

/// Default deadline for establishing the TCP/TLS connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable overriding [`TransportConfig::connect_timeout`] (seconds).
pub const CONNECT_TIMEOUT_ENV: &str = "HTTP_STREAM_CONNECT_TIMEOUT_SECS";

/// Environment variable providing [`TransportConfig::proxy_url`].
pub const PROXY_URL_ENV: &str = "HTTP_STREAM_PROXY_URL";

/// Transport configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            proxy_url: None,
        }
    }
}

impl TransportConfig {
    /// Defaults, overridden by `HTTP_STREAM_*` environment variables when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => cfg.connect_timeout = Duration::from_secs(secs),
                _ => warn!(
                    value = %raw,
                    "ignoring invalid {}, expected positive integer seconds", CONNECT_TIMEOUT_ENV
                ),
            }
        }

        if let Some(proxy) = lookup(PROXY_URL_ENV) {
            let proxy = proxy.trim();
            if !proxy.is_empty() {
                cfg.proxy_url = Some(proxy.to_string());
            }
        }

        cfg
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
