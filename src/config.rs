//! Client configuration

use crate::error::{Error, Result};
use std::time::Duration;

/// Base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

pub const ENV_API_URL: &str = "PHISHGUARD_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PHISHGUARD_TIMEOUT_SECS";
pub const ENV_RECENT_LIMIT: &str = "PHISHGUARD_RECENT_LIMIT";

/// Detection service client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the detection API, without trailing slash
    pub api_base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Default number of rows for the recent activity feed
    pub recent_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            recent_limit: 10,
        }
    }
}

impl ClientConfig {
    /// Build a config from `PHISHGUARD_*` environment variables, falling
    /// back to defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_api_url(&url)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| Error::Config {
                key: ENV_TIMEOUT_SECS.into(),
                message: format!("expected whole seconds, got {raw:?}"),
            })?;
            if secs == 0 {
                return Err(Error::Config {
                    key: ENV_TIMEOUT_SECS.into(),
                    message: "timeout must be at least one second".into(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_RECENT_LIMIT) {
            config.recent_limit = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| Error::Config {
                    key: ENV_RECENT_LIMIT.into(),
                    message: format!("expected a positive integer, got {raw:?}"),
                })?;
        }

        Ok(config)
    }

    /// Replace the base URL, normalizing away trailing slashes.
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config {
                key: ENV_API_URL.into(),
                message: format!("expected an http(s) URL, got {url:?}"),
            });
        }
        self.api_base_url = trimmed.to_string();
        Ok(self)
    }

    /// Join an endpoint path onto the base URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}
