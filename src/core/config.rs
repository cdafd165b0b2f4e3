//! Runtime configuration and platform constants
//!
//! Configuration is read from the process environment exactly once at
//! startup (`Config::from_env`) and passed to the components that need it.
//! A missing bot token is fatal; everything else has a sensible default.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Currency code for Telegram Stars payments.
///
/// Stars invoices must be created without a provider token; see
/// <https://core.telegram.org/bots/api#createinvoicelink>.
pub const STARS_CURRENCY: &str = "XTR";

/// Default HTTP listening port.
pub const DEFAULT_PORT: u16 = 5001;

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "starpay.log";

/// Default CORS origin allow-list (local development frontends).
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:5174",
    "http://localhost:5001",
    "http://127.0.0.1:4040",
];

/// Configuration loading errors. Fatal at startup, never per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    /// Environment variable is set but cannot be parsed
    #[error("environment variable {var} has an invalid value: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Process configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token (`TELEGRAM_BOT_TOKEN`)
    pub bot_token: String,
    /// Payment provider credential (`TELEGRAM_PROVIDER_TOKEN`); not needed
    /// for Telegram Stars invoices
    pub provider_token: Option<String>,
    /// HTTP listening port (`PORT`)
    pub port: u16,
    /// CORS origin allow-list (`ALLOWED_ORIGINS`, comma-separated)
    pub allowed_origins: Vec<String>,
    /// Log file path (`LOG_FILE`)
    pub log_file: String,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if `TELEGRAM_BOT_TOKEN` is missing or `PORT`
    /// cannot be parsed as a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| ConfigError::MissingVar("TELEGRAM_BOT_TOKEN"))?;

        // An empty provider token means "not configured" (Stars-only setup)
        let provider_token = env::var("TELEGRAM_PROVIDER_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                var: "PORT",
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/').to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            Err(_) => DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Config {
            bot_token,
            provider_token,
            port,
            allowed_origins,
            log_file,
        })
    }
}

/// Invoice field limits imposed by the Telegram Bot API
pub mod limits {
    /// Maximum invoice title length in characters
    pub const TITLE_MAX_CHARS: usize = 32;

    /// Maximum invoice description length in characters
    pub const DESCRIPTION_MAX_CHARS: usize = 255;

    /// Maximum invoice payload size in bytes
    pub const PAYLOAD_MAX_BYTES: usize = 128;

    /// Maximum number of suggested tip amounts per invoice
    pub const MAX_SUGGESTED_TIP_AMOUNTS: usize = 4;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
