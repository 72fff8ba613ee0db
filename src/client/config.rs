//! # Client Configuration
//!
//! Process-wide settings attached to every request: where E-utilities lives,
//! how the client identifies itself, and how long a request may take.
//!
//! NCBI asks every client to send a `tool` name and a contact `email`. The
//! email is mandatory here; a client cannot be built without one.
//!
//! ## Environment
//!
//! | Variable       | Required | Effect                                      |
//! |----------------|----------|---------------------------------------------|
//! | `ENTREZ_EMAIL` | yes      | Sent as `email` on every request            |
//! | `NCBI_API_KEY` | no       | Sent as `api_key`; raises the limit to 10/s |

use crate::error::{EntrezError, Result};
use crate::query::{Params, DEFAULT_BASE_URL};
use crate::rate_limiter::RateLimiterConfig;
use std::time::Duration;
use url::Url;

/// Environment variable holding the contact email.
pub const EMAIL_ENV: &str = "ENTREZ_EMAIL";

/// Environment variable holding the optional NCBI API key.
pub const API_KEY_ENV: &str = "NCBI_API_KEY";

/// Tool name sent when none is configured.
pub const DEFAULT_TOOL: &str = env!("CARGO_PKG_NAME");

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every request a client sends.
///
/// ## Example
///
/// ```rust
/// use entrez_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("curator@example.org")
///     .with_tool("variant-annotator")
///     .with_timeout(Duration::from_secs(10));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.default_params().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,

    /// Value of the `tool` parameter.
    pub tool: String,

    /// Value of the `email` parameter.
    pub email: String,

    /// Value of the `api_key` parameter, if any.
    pub api_key: Option<String>,

    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration with the given contact email and defaults for
    /// everything else.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tool: DEFAULT_TOOL.to_string(),
            email: email.into(),
            api_key: None,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Configuration`] when `ENTREZ_EMAIL` is unset or
    /// blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// [`ClientConfig::from_env`] is this with `std::env::var`.
    ///
    /// ```rust
    /// use entrez_client::ClientConfig;
    ///
    /// let config = ClientConfig::from_lookup(|key| match key {
    ///     "ENTREZ_EMAIL" => Some("curator@example.org".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.email, "curator@example.org");
    ///
    /// assert!(ClientConfig::from_lookup(|_| None).is_err());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(EMAIL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                EntrezError::Configuration(format!(
                    "please set {EMAIL_ENV} environment variable"
                ))
            })?;

        let api_key = lookup(API_KEY_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let config = Self {
            api_key,
            ..Self::new(email)
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the tool name.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Removes the per-request timeout.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Configuration`] if:
    /// - `email` or `tool` is blank
    /// - `api_key` is present but blank
    /// - `base_url` is not an absolute `http`/`https` URL
    /// - `timeout` is zero
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(EntrezError::Configuration(format!(
                "contact email must not be empty; set {EMAIL_ENV}"
            )));
        }

        if self.tool.trim().is_empty() {
            return Err(EntrezError::Configuration(
                "tool name must not be empty".to_string(),
            ));
        }

        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err(EntrezError::Configuration(
                "api key must not be empty when set".to_string(),
            ));
        }

        let base = Url::parse(&self.base_url).map_err(|e| {
            EntrezError::Configuration(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(EntrezError::Configuration(format!(
                "base URL must use http or https, got {:?}",
                base.scheme()
            )));
        }

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(EntrezError::Configuration(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Parameters sent on every request: `tool`, `email`, and `api_key` when set.
    pub fn default_params(&self) -> Params {
        let mut params = Params::new()
            .with("tool", self.tool.as_str())
            .with("email", self.email.as_str());
        if let Some(key) = &self.api_key {
            params.insert("api_key", key.as_str());
        }
        params
    }

    /// The request rate NCBI allows for this configuration.
    pub fn rate_limit(&self) -> RateLimiterConfig {
        if self.api_key.is_some() {
            RateLimiterConfig::ncbi_with_api_key()
        } else {
            RateLimiterConfig::ncbi_default()
        }
    }
}
