//! Backend location and polling cadence.
//!
//! The backend origin comes from `LOBBY_BACKEND_URL`. Native builds read it at
//! runtime (a `.env` file is honoured), browser builds bake it in at compile
//! time. Every request goes to `<origin>/api/...`.

use std::time::Duration;

use crate::errors::ConfigError;

pub const BACKEND_URL_VAR: &str = "LOBBY_BACKEND_URL";
pub const POLL_SECS_VAR: &str = "LOBBY_POLL_SECS";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

const API_SUFFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    backend_url: String,
    poll_interval: Duration,
}

impl ApiConfig {
    pub fn new(backend_url: impl Into<String>) -> Result<Self, ConfigError> {
        let backend_url = backend_url.into().trim().trim_end_matches('/').to_string();
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }
        Ok(Self {
            backend_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; the variables may come from the shell.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| match name {
            BACKEND_URL_VAR => option_env!("LOBBY_BACKEND_URL").map(str::to_string),
            POLL_SECS_VAR => option_env!("LOBBY_POLL_SECS").map(str::to_string),
            _ => None,
        })
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(BACKEND_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingBackendUrl(BACKEND_URL_VAR))?;
        let mut config = Self::new(url)?;

        if let Some(raw) = lookup(POLL_SECS_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidPollInterval {
                    name: POLL_SECS_VAR,
                    value: raw.clone(),
                })?;
            config.poll_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.poll_interval = interval;
        Ok(self)
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// The root every endpoint path is appended to.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.backend_url, API_SUFFIX)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
