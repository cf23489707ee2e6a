//! Startup configuration
//!
//! Read once from the environment; a missing credential or recipient is
//! fatal to the process before it binds the listener.

use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;

/// Identity of the single forward recipient
#[derive(Debug, Clone)]
pub struct RecipientConfig {
    pub chat_id: i64,
    /// Human-readable label used in user-facing acknowledgements
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub recipient: RecipientConfig,
    pub port: u16,
    /// Public URL to register via `setWebhook` at startup
    pub webhook_url: Option<String>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` value
    pub webhook_secret: Option<String>,
    /// Upper bound on one forward attempt
    pub forward_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = require(&get, "BOT_TOKEN")?;
        let recipient = RecipientConfig {
            chat_id: parse(require(&get, "ADMIN_CHAT_ID")?, "ADMIN_CHAT_ID")?,
            label: require(&get, "ADMIN_USERNAME")?,
        };

        let port = match get("KASSABOT_PORT") {
            Some(raw) => parse(raw, "KASSABOT_PORT")?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("KASSABOT_FORWARD_TIMEOUT_SECS") {
            Some(raw) => parse(raw, "KASSABOT_FORWARD_TIMEOUT_SECS")?,
            None => DEFAULT_FORWARD_TIMEOUT_SECS,
        };

        Ok(Self {
            bot_token,
            recipient,
            port,
            webhook_url: get("KASSABOT_WEBHOOK_URL"),
            webhook_secret: get("KASSABOT_WEBHOOK_SECRET"),
            forward_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    get(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse<T: std::str::FromStr>(raw: String, name: &'static str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}
