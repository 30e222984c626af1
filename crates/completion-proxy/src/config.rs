//! Process-wide configuration read from the environment.
//!
//! Nothing here validates the provider credential. A missing or rejected key
//! only surfaces when a completion is attempted.

use std::net::SocketAddr;
use std::str::FromStr;

use secrecy::SecretString;

use crate::logging::LoggingConfig;
use crate::{Error, Result};

pub const OPENAI_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";
pub const OPENAI_MODEL_ENV_VAR: &str = "OPENAI_MODEL";
pub const OPENAI_MAX_COMPLETION_TOKENS_ENV_VAR: &str = "OPENAI_MAX_COMPLETION_TOKENS";
pub const BIND_ADDRESS_ENV_VAR: &str = "BIND_ADDRESS";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Output cap applied by the hosted endpoint.
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 50;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// Connection settings for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub model: String,
    /// `None` leaves the output length to the provider.
    pub max_completion_tokens: Option<u32>,
    pub bind_address: SocketAddr,
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let max_completion_tokens = match get(OPENAI_MAX_COMPLETION_TOKENS_ENV_VAR) {
            None => Some(DEFAULT_MAX_COMPLETION_TOKENS),
            Some(value) if value.eq_ignore_ascii_case("none") => None,
            Some(value) => Some(parse(OPENAI_MAX_COMPLETION_TOKENS_ENV_VAR, &value)?),
        };

        let bind_address = parse(
            BIND_ADDRESS_ENV_VAR,
            &get(BIND_ADDRESS_ENV_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        )?;

        let mut logging = LoggingConfig::default();
        if let Some(level) = get(LOG_LEVEL_ENV_VAR) {
            logging.level = level;
        }
        if let Some(format) = get(LOG_FORMAT_ENV_VAR) {
            logging.format = parse(LOG_FORMAT_ENV_VAR, &format)?;
        }

        Ok(Self {
            openai: OpenAiConfig {
                api_key: get(OPENAI_API_KEY_ENV_VAR).map(SecretString::from),
                base_url: get(OPENAI_BASE_URL_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            model: get(OPENAI_MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_completion_tokens,
            bind_address,
            logging,
        })
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}
