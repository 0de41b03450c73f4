//! Client configuration from the environment.
//!
//! `.env` is loaded first when present, then each variable overrides its
//! default. Unparseable values are configuration errors rather than silent
//! fallbacks.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_RESEARCH_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Settings for talking to the research backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// Base URL of the research API
    #[validate(url)]
    pub api_url: String,
    /// Timeout for report generation, which runs a full research pass
    #[validate(range(min = 1, max = 3600))]
    pub research_timeout_secs: u64,
    /// Timeout for follow-up, image and prompt calls
    #[validate(range(min = 1, max = 3600))]
    pub request_timeout_secs: u64,
    pub fast_mode: bool,
    /// Pins the follow-up question shuffle
    pub follow_up_seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            research_timeout_secs: DEFAULT_RESEARCH_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fast_mode: false,
            follow_up_seed: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}

fn parse_flag(name: &str) -> Result<Option<bool>, AppError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(AppError::Config(format!("{} is not a boolean: '{}'", name, raw))),
        },
        Err(_) => Ok(None),
    }
}

impl ClientConfig {
    /// Load `.env` (if any) and then read the environment.
    pub fn load() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            debug!(".env file loaded");
        }
        Self::from_env()
    }

    /// Read the environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(url) = parse_var::<String>("RESEARCH_API_URL")? {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = parse_var("RESEARCH_TIMEOUT_SECS")? {
            config.research_timeout_secs = secs;
        }
        if let Some(secs) = parse_var("REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs = secs;
        }
        if let Some(fast) = parse_flag("RESEARCH_FAST_MODE")? {
            config.fast_mode = fast;
        }
        config.follow_up_seed = parse_var("FOLLOW_UP_SEED")?;

        config.validate()?;
        debug!("Client config: {:?}", config);
        Ok(config)
    }

    pub fn research_timeout(&self) -> Duration {
        Duration::from_secs(self.research_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
