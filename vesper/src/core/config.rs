use std::time::Duration;

use derive_builder::Builder;

use crate::{
    core::konst,
    error::{BuildError, core::ConfigError},
};

#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(default, setter(into), build_fn(error = "BuildError"))]
pub struct Config {
    /// Base URL every route is appended to.
    pub api_base: String,
    /// How long a gate waits for its acknowledgment before failing.
    pub ack_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::from(konst::discord::API_BASE),
            ack_timeout: konst::gate::ACK_TIMEOUT,
            request_timeout: konst::http::REQUEST_TIMEOUT,
            user_agent: String::from(konst::http::USER_AGENT),
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Loads `.env` if there is one, then reads the process environment.
    ///
    /// # Errors
    /// if `.env` exists but cannot be parsed, or a variable holds an invalid
    /// value
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(?path, "loaded environment file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset variables keep their
    /// defaults.
    ///
    /// # Errors
    /// if a variable holds an invalid value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(api_base) = lookup(konst::env::API_BASE) {
            if api_base.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    name: konst::env::API_BASE,
                    value: api_base,
                });
            }
            config.api_base = api_base;
        }
        if let Some(ms) = lookup(konst::env::ACK_TIMEOUT_MS) {
            config.ack_timeout = parse_millis(konst::env::ACK_TIMEOUT_MS, ms)?;
        }
        if let Some(ms) = lookup(konst::env::REQUEST_TIMEOUT_MS) {
            config.request_timeout = parse_millis(konst::env::REQUEST_TIMEOUT_MS, ms)?;
        }
        if let Some(user_agent) = lookup(konst::env::USER_AGENT) {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

fn parse_millis(name: &'static str, value: String) -> Result<Duration, ConfigError> {
    let parsed = value.trim().parse::<u64>();
    match parsed {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
