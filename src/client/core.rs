//! # Entrez Client
//!
//! The four E-utilities operations, each a thin shape over [`EntrezClient::perform`].
//!
//! ```text
//!     fetch / info / search / summary
//!                  │
//!                  ▼
//!     perform(endpoint, db, params)
//!        ├─ query = defaults ∪ {db} ∪ params   (params win, db always set)
//!        ├─ limiter.admit()                    (may block)
//!        └─ transport.get(url) ──► Response    (returned unmodified)
//! ```

use super::config::ClientConfig;
use super::transport::{HttpTransport, Response, Transport};
use crate::error::{EntrezError, Result};
use crate::query::{request_url, Endpoint, Params, SearchTerm, SearchTerms};
use crate::rate_limiter::RateLimiter;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Client for the NCBI E-utilities API.
///
/// Cloning is cheap; clones share the same rate limiter and transport, so the
/// limit holds across all of them.
///
/// ## Example
///
/// ```rust,no_run
/// use entrez_client::{EntrezClient, Params, SearchTerms};
///
/// let client = EntrezClient::from_env()?;
///
/// let found = client.search(
///     "genomeprj",
///     SearchTerms::new().field("WORD", "hapmap").field("SEQS", "inprogress"),
///     &Params::new().with("retmode", "xml"),
/// )?;
/// println!("{}", found.text());
///
/// let record = client.fetch("snp", &Params::new().with("id", 123).with("retmode", "xml"))?;
/// println!("{}", record.status());
/// # Ok::<(), entrez_client::EntrezError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EntrezClient {
    base_url: String,
    default_params: Params,
    limiter: Arc<RateLimiter>,
    transport: Arc<dyn Transport>,
}

impl EntrezClient {
    /// Builds a client from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Configuration`] if `ENTREZ_EMAIL` is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Builds a client with its own rate limiter and an HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Configuration`] for an invalid configuration
    /// and [`EntrezError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let limiter = RateLimiter::try_with_clock(
            config.rate_limit(),
            Arc::new(crate::rate_limiter::SystemClock::new()),
        )
        .map_err(|msg| EntrezError::Configuration(msg.to_string()))?;
        let transport = HttpTransport::new(config.timeout)?;

        Self::from_parts(config, Arc::new(limiter), Arc::new(transport))
    }

    /// Starts a [`EntrezClientBuilder`](crate::EntrezClientBuilder).
    pub fn builder() -> crate::EntrezClientBuilder {
        crate::EntrezClientBuilder::new()
    }

    /// Assembles a client from already constructed collaborators.
    pub(crate) fn from_parts(
        config: ClientConfig,
        limiter: Arc<RateLimiter>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_params: config.default_params(),
            limiter,
            transport,
        })
    }

    /// EFetch: retrieves records for the UIDs in `params` (`id`, `rettype`, `retmode`, ...).
    ///
    /// E.g. `client.fetch("snp", &Params::new().with("id", 123).with("retmode", "xml"))`.
    pub fn fetch(&self, database: &str, params: &Params) -> Result<Response> {
        self.perform(Endpoint::Fetch, database, params)
    }

    /// EInfo: statistics and searchable fields for `database`.
    pub fn info(&self, database: &str, params: &Params) -> Result<Response> {
        self.perform(Endpoint::Info, database, params)
    }

    /// ESearch: UIDs in `database` matching `search_terms`.
    ///
    /// `search_terms` is either a literal query string or a [`SearchTerms`]
    /// mapping (joined with `AND`), or a [`SearchTerm`] carrying its own
    /// operator. The serialized form is sent as `term`, replacing any `term`
    /// already in `params`.
    pub fn search(
        &self,
        database: &str,
        search_terms: impl Into<SearchTerm>,
        params: &Params,
    ) -> Result<Response> {
        let mut params = params.clone();
        params.insert("term", search_terms.into().render());
        self.perform(Endpoint::Search, database, &params)
    }

    /// ESearch with the clause operator given as text.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::UnknownOperator`] before anything is sent if
    /// `operator` is not `AND` or `OR`.
    pub fn search_with_operator(
        &self,
        database: &str,
        search_terms: SearchTerms,
        operator: &str,
        params: &Params,
    ) -> Result<Response> {
        let term = SearchTerm::with_operator(search_terms, operator)?;
        self.search(database, term, params)
    }

    /// ESummary: document summaries for the UIDs in `params`.
    pub fn summary(&self, database: &str, params: &Params) -> Result<Response> {
        self.perform(Endpoint::Summary, database, params)
    }

    /// Admits the request through the rate limiter, then GETs `endpoint`.
    ///
    /// The response is returned as received, including non-2xx statuses.
    ///
    /// # Errors
    ///
    /// [`EntrezError::InvalidUrl`] if the URL cannot be built, otherwise
    /// whatever the transport reports.
    pub fn perform(&self, endpoint: Endpoint, database: &str, params: &Params) -> Result<Response> {
        let url = self.request_url(endpoint, database, params)?;

        let waited = self.limiter.admit();
        debug!(
            endpoint = %endpoint,
            db = database,
            waited_ms = waited.as_millis() as u64,
            "Sending E-utilities request"
        );

        let response = self.transport.get(&url)?;

        let status = response.status();
        if status.is_success() {
            debug!(endpoint = %endpoint, status = %status, "Received response");
        } else {
            warn!(endpoint = %endpoint, status = %status, "E-utilities returned a non-success status");
        }

        Ok(response)
    }

    /// Builds the URL [`EntrezClient::perform`] would request, without
    /// admitting or sending anything.
    ///
    /// Query order is: default parameters, `db`, then caller parameters.
    /// Caller parameters override defaults in place; `db` is always
    /// `database`.
    ///
    /// ```rust
    /// use entrez_client::{ClientConfig, EntrezClient, Endpoint, Params};
    ///
    /// let client = EntrezClient::new(ClientConfig::new("a@b.org").with_tool("demo"))?;
    /// let url = client.request_url(Endpoint::Fetch, "snp", &Params::new().with("id", vec![1, 2]))?;
    ///
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?tool=demo&email=a%40b.org&db=snp&id=1%2C2"
    /// );
    /// # Ok::<(), entrez_client::EntrezError>(())
    /// ```
    pub fn request_url(&self, endpoint: Endpoint, database: &str, params: &Params) -> Result<Url> {
        let mut query = self.default_params.clone();
        query.insert("db", database);
        query.merge(params);
        query.insert("db", database);

        request_url(&self.base_url, endpoint, &query)
    }

    /// Parameters attached to every request.
    pub fn default_params(&self) -> &Params {
        &self.default_params
    }

    /// Base URL the endpoint paths are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The limiter every request passes through.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}
