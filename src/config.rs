//! Runtime configuration from environment variables.
//!
//! API base URL: `KIDSCARE_API_URL` > `API_URL` > localhost default. A `.env`
//! file in the working directory is loaded by the binary before this runs.

use std::time::Duration;

use thiserror::Error;

use crate::api::ClientConfig;
use crate::session::keychain::DEFAULT_SERVICE_NAME;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub keychain_service: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            keychain_service: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("KIDSCARE_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if api_base_url.trim().is_empty() {
            return Err(ConfigError::Empty {
                var: "KIDSCARE_API_URL",
            });
        }

        let timeout = seconds(&lookup, "KIDSCARE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let connect_timeout = seconds(
            &lookup,
            "KIDSCARE_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        let keychain_service = lookup("KIDSCARE_KEYCHAIN_SERVICE")
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        if keychain_service.trim().is_empty() {
            return Err(ConfigError::Empty {
                var: "KIDSCARE_KEYCHAIN_SERVICE",
            });
        }

        Ok(Self {
            api_base_url: api_base_url.trim().to_string(),
            timeout,
            connect_timeout,
            keychain_service,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

fn seconds<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(Duration::from_secs(default));
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { var, value }),
    }
}
