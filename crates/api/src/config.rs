//! Application configuration loaded from environment variables.

use std::time::Duration;

use fulfillment::Timeouts;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CHARGE_TIMEOUT_MS` — payment call bound (default: `10000`)
/// - `STORE_TIMEOUT_MS` — store insert bound (default: `5000`)
/// - `NOTIFY_TIMEOUT_MS` — notification send bound (default: `3000`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub charge_timeout_ms: u64,
    pub store_timeout_ms: u64,
    pub notify_timeout_ms: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT").unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            charge_timeout_ms: env_parse("CHARGE_TIMEOUT_MS").unwrap_or(defaults.charge_timeout_ms),
            store_timeout_ms: env_parse("STORE_TIMEOUT_MS").unwrap_or(defaults.store_timeout_ms),
            notify_timeout_ms: env_parse("NOTIFY_TIMEOUT_MS").unwrap_or(defaults.notify_timeout_ms),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the remote-call bounds for the workflow.
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            charge: Duration::from_millis(self.charge_timeout_ms),
            store: Duration::from_millis(self.store_timeout_ms),
            notify: Duration::from_millis(self.notify_timeout_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            charge_timeout_ms: 10_000,
            store_timeout_ms: 5_000,
            notify_timeout_ms: 3_000,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
