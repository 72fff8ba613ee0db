//! # Entrez Client - Rate-Limited NCBI E-utilities Access
//!
//! A small blocking client for the NCBI Entrez E-utilities API. It builds
//! correctly encoded queries, sends them to the four core utilities, and
//! makes sure the service's request limit is never exceeded.
//!
//! ## The Rate Limit
//!
//! NCBI permits 3 requests in any rolling second (10 with an API key). Every
//! request goes through a shared [`RateLimiter`] first:
//!
//! ```text
//!     Sliding window, 3 per second:
//!
//!     t=0.00  request 1 ──► sent
//!     t=0.05  request 2 ──► sent
//!     t=0.10  request 3 ──► sent
//!     t=0.15  request 4 ──► sleep 0.85s ──► sent at t=1.00
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use entrez_client::{EntrezClient, Params, SearchTerms};
//!
//! // Reads ENTREZ_EMAIL (required) and NCBI_API_KEY (optional)
//! let client = EntrezClient::from_env()?;
//!
//! // E.g. all in-progress HapMap genome projects
//! let response = client.search(
//!     "genomeprj",
//!     SearchTerms::new().field("WORD", "hapmap").field("SEQS", "inprogress"),
//!     &Params::new().with("retmode", "xml"),
//! )?;
//! println!("{}", response.text());
//!
//! // Records for a list of UIDs
//! let records = client.fetch("snp", &Params::new().with("id", vec![123, 456]))?;
//! # Ok::<(), entrez_client::EntrezError>(())
//! ```
//!
//! ## Search Terms
//!
//! ```rust
//! use entrez_client::{convert_search_terms, SearchTerms};
//!
//! let terms = SearchTerms::new()
//!     .field("WORD", "low coverage")
//!     .field("SEQS", "inprogress");
//!
//! assert_eq!(
//!     convert_search_terms(&terms, "AND").unwrap(),
//!     "low coverage[WORD]+AND+inprogress[SEQS]"
//! );
//! assert!(convert_search_terms(&terms, "XOR").is_err());
//! ```
//!
//! ## Architecture Overview
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │   Your Application      │
//!                    └──────────┬──────────────┘
//!                               │
//!                    ┌──────────▼──────────────┐
//!                    │      EntrezClient       │
//!                    ├─────────────────────────┤
//!                    │  • fetch()   • info()   │
//!                    │  • search()  • summary()│
//!                    └──────────┬──────────────┘
//!                               │ perform()
//!            ┌──────────────────┼──────────────────┐
//!            │                  │                  │
//!     ┌──────▼──────┐   ┌───────▼───────┐   ┌──────▼──────┐
//!     │   query     │   │  RateLimiter  │   │  Transport  │
//!     ├─────────────┤   ├───────────────┤   ├─────────────┤
//!     │ • Params    │   │ • admit()     │   │ • reqwest   │
//!     │ • terms     │   │ • ring of 3   │   │   blocking  │
//!     │ • URL       │   │ • Clock       │   │ • Response  │
//!     └─────────────┘   └───────────────┘   └─────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! [`EntrezClient`] and [`RateLimiter`] are `Send + Sync`. Clones of a client
//! share one limiter; several clients can also be built around the same
//! `Arc<RateLimiter>` with [`EntrezClientBuilder::rate_limiter`].
//!
//! ## Errors
//!
//! Every fallible call returns [`EntrezError`]. Responses with a non-2xx
//! status are *not* errors; they come back as a [`Response`] so the caller
//! sees exactly what NCBI sent.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    missing_debug_implementations
)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod query;
mod rate_limiter;

pub use client::{
    ClientConfig, EntrezClient, HttpTransport, Response, Transport, API_KEY_ENV, DEFAULT_TIMEOUT,
    DEFAULT_TOOL, EMAIL_ENV,
};
pub use error::{EntrezError, Result};
pub use query::{
    convert_search_terms, Endpoint, Operator, Params, SearchTerm, SearchTerms, Value,
    DEFAULT_BASE_URL,
};
pub use rate_limiter::{
    Clock, LimiterMetrics, ManualClock, RateLimiter, RateLimiterConfig, SystemClock,
    NCBI_KEYED_REQUESTS_PER_SECOND, NCBI_REQUESTS_PER_SECOND,
};

/// Re-exported so callers can inspect [`Response`] status codes and headers
/// without depending on reqwest directly.
pub use reqwest;
/// Re-exported for [`EntrezClient::request_url`] and [`Transport`] implementations.
pub use url;

use std::sync::Arc;
use std::time::Duration;

/// A rate limiter wrapped in `Arc` for sharing between clients.
pub type SharedRateLimiter = Arc<RateLimiter>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use entrez_client::prelude::*;
///
/// let terms = SearchTerms::new().field("WORD", "hapmap");
/// let params = Params::new().with("retmode", "xml");
/// ```
pub mod prelude {
    //! Common imports for typical client usage.

    pub use crate::{
        ClientConfig, EntrezClient, EntrezClientBuilder, EntrezError, Operator, Params,
        RateLimiter, RateLimiterConfig, Response, SearchTerm, SearchTerms, SharedRateLimiter,
    };
}

/// Builder for [`EntrezClient`].
///
/// Lets several clients share one limiter, or swap in a different
/// [`Transport`] (a proxy, a recording double).
///
/// # Example
///
/// ```rust
/// use entrez_client::{EntrezClientBuilder, RateLimiter};
/// use std::sync::Arc;
///
/// let limiter = Arc::new(RateLimiter::ncbi());
///
/// let annotator = EntrezClientBuilder::new()
///     .email("curator@example.org")
///     .tool("annotator")
///     .rate_limiter(limiter.clone())
///     .build()?;
///
/// let importer = EntrezClientBuilder::new()
///     .email("curator@example.org")
///     .tool("importer")
///     .rate_limiter(limiter.clone())
///     .build()?;
///
/// assert!(Arc::ptr_eq(annotator.rate_limiter(), importer.rate_limiter()));
///
/// // No email, no client
/// assert!(EntrezClientBuilder::new().build().is_err());
/// # Ok::<(), entrez_client::EntrezError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntrezClientBuilder {
    email: Option<String>,
    tool: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Option<Duration>>,
    limiter: Option<SharedRateLimiter>,
    transport: Option<Arc<dyn Transport>>,
}

impl EntrezClientBuilder {
    /// Creates an empty builder. An email must be supplied before `build()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every setting from an existing configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.email = Some(config.email);
        self.tool = Some(config.tool);
        self.api_key = config.api_key;
        self.base_url = Some(config.base_url);
        self.timeout = Some(config.timeout);
        self
    }

    /// Sets the contact email (required).
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the tool name.
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Sets the NCBI API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-request timeout; `None` disables it.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses an existing limiter instead of creating one.
    pub fn rate_limiter(mut self, limiter: SharedRateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Uses a custom transport instead of [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Configuration`] if no email was supplied or the
    /// resulting configuration is invalid, and [`EntrezError::Transport`] if
    /// the default HTTP transport cannot be created.
    pub fn build(self) -> Result<EntrezClient> {
        let email = self.email.ok_or_else(|| {
            EntrezError::Configuration(format!(
                "a contact email is required; set {EMAIL_ENV} or call .email()"
            ))
        })?;

        let mut config = ClientConfig::new(email);
        if let Some(tool) = self.tool {
            config.tool = tool;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.api_key = self.api_key;
        config.validate()?;

        let limiter = match self.limiter {
            Some(limiter) => limiter,
            None => Arc::new(
                RateLimiter::try_with_clock(config.rate_limit(), Arc::new(SystemClock::new()))
                    .map_err(|msg| EntrezError::Configuration(msg.to_string()))?,
            ),
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(config.timeout)?),
        };

        EntrezClient::from_parts(config, limiter, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_email() {
        let err = EntrezClientBuilder::new().tool("x").build().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("ENTREZ_EMAIL"));
    }

    #[test]
    fn test_builder_applies_settings() {
        let client = EntrezClientBuilder::new()
            .email("a@b.org")
            .tool("annotator")
            .api_key("secret")
            .base_url("http://localhost:1234/eutils")
            .timeout(Some(Duration::from_secs(3)))
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "http://localhost:1234/eutils");
        let defaults: Vec<(&str, String)> = client
            .default_params()
            .iter()
            .map(|(k, v)| (k, v.render()))
            .collect();
        assert_eq!(
            defaults,
            vec![
                ("tool", "annotator".to_string()),
                ("email", "a@b.org".to_string()),
                ("api_key", "secret".to_string()),
            ]
        );

        // A keyed client gets the higher NCBI limit
        assert_eq!(client.rate_limiter().config(), RateLimiterConfig::ncbi_with_api_key());
    }

    #[test]
    fn test_builder_from_config() {
        let config = ClientConfig::new("a@b.org").with_tool("seeded").without_timeout();
        let client = EntrezClientBuilder::new().config(config).build().unwrap();

        assert_eq!(client.default_params().get("tool"), Some(&Value::from("seeded")));
        assert_eq!(client.rate_limiter().config(), RateLimiterConfig::ncbi_default());
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let err = EntrezClientBuilder::new()
            .email("a@b.org")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_shared_limiter() {
        let limiter: SharedRateLimiter = Arc::new(RateLimiter::ncbi());
        let a = EntrezClientBuilder::new()
            .email("a@b.org")
            .rate_limiter(limiter.clone())
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(a.rate_limiter(), &limiter));
    }

    #[test]
    fn test_builder_accepts_wrapped_reqwest_client() {
        let http = reqwest::blocking::Client::builder()
            .user_agent("annotator/2.0")
            .build()
            .unwrap();
        let client = EntrezClientBuilder::new()
            .email("a@b.org")
            .transport(Arc::new(HttpTransport::from_client(http)))
            .build()
            .unwrap();

        let url = client.request_url(Endpoint::Info, "gene", &Params::new()).unwrap();
        assert_eq!(url.path(), "/entrez/eutils/einfo.fcgi");
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let _terms = SearchTerms::new();
        let _params = Params::new();
        let _operator = Operator::Or;
        let _config = RateLimiterConfig::default();
    }

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(DEFAULT_TOOL, "entrez-client");
    }
}
