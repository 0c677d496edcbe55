//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults

use std::time::Duration;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;

/// Load the configuration from the environment.
///
/// The result is owned by the caller and handed to whatever needs it; there is
/// no process-wide copy.
pub fn load() -> crate::Result<AppConfig> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = with_defaults(config::Config::builder())?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (WADASH__API__BASE_URL, WADASH__TENANT__RESERVED_SEGMENTS, etc.)
        .add_source(
            config::Environment::with_prefix("WADASH")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tenant.reserved_segments"),
        )
        .build()?;

    Ok(cfg.try_deserialize()?)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("api.base_url", "http://localhost:8000")?
        .set_default("api.timeout_secs", 30)?
        .set_default("tenant.reserved_segments", Vec::<String>::new())?
        .set_default("log.filter", "wadash=info")
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub tenant: TenantConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Root of the bot backend, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout; `0` disables it.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TenantConfig {
    /// Top-level route names that must never be sent as a tenant id
    /// (e.g. `login`). Empty by default.
    pub reserved_segments: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub filter: String,
}
