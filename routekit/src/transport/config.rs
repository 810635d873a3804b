//! Configuration for [`HttpTransport`](super::HttpTransport).

use std::env;
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::error::ConfigError;

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the base URL.
pub(crate) const ENV_BASE_URL: &str = "ROUTEKIT_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub(crate) const ENV_TIMEOUT_SECS: &str = "ROUTEKIT_TIMEOUT_SECS";

/// Settings for the bundled HTTP transport.
///
/// Route URLs are joined onto `base_url` with [`Url::join`], so a base URL
/// with a path component should end in `/` (`https://api.example.com/v1/`).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// Base URL every resolved route URL is joined onto.
    pub base_url: Url,
    /// Timeout applied to every request unless a call overrides it.
    pub timeout: Duration,
    /// Headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl HttpConfig {
    /// Create configuration with explicit values.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: Vec::new(),
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `ROUTEKIT_BASE_URL` (required): base URL for all routes
    /// - `ROUTEKIT_TIMEOUT_SECS` (optional): request timeout in seconds
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] if the base URL is not set and
    /// [`ConfigError::InvalidEnv`] if a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup(ENV_BASE_URL).ok_or(ConfigError::MissingEnv { var: ENV_BASE_URL })?;
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidEnv {
            var: ENV_BASE_URL,
            message: e.to_string(),
        })?;

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_SECS,
                    message: format!("{raw:?}: {e}"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        info!(
            base_url = %base_url,
            timeout_secs = timeout.as_secs(),
            "HTTP transport configured from environment"
        );

        Ok(Self {
            base_url,
            timeout,
            headers: Vec::new(),
        })
    }
}
