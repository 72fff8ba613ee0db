//! HTTP transport seam.
//!
//! The client only needs one thing from the network: "GET this URL and give
//! me back what came back". [`Transport`] captures exactly that, and
//! [`HttpTransport`] implements it with reqwest's blocking client.

use crate::error::{EntrezError, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;
use tracing::error;
use url::Url;

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A raw E-utilities response.
///
/// Nothing is parsed: the status, headers and body are exactly what the
/// service returned, whatever the status code.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Consumes the response, returning the body bytes.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Converts a non-2xx response into [`EntrezError::Status`].
    ///
    /// ```rust
    /// use entrez_client::{reqwest::header::HeaderMap, reqwest::StatusCode, Response};
    ///
    /// let ok = Response::new(StatusCode::OK, HeaderMap::new(), "<eSearchResult/>");
    /// assert!(ok.error_for_status().is_ok());
    ///
    /// let bad = Response::new(StatusCode::BAD_REQUEST, HeaderMap::new(), "Invalid db name");
    /// assert!(bad.error_for_status().is_err());
    /// ```
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(EntrezError::Status {
                status: self.status.as_u16(),
                body: self.text().into_owned(),
            })
        }
    }
}

/// Issues HTTP GET requests on behalf of the client.
///
/// Implementations must return every response the server sends, successful
/// or not, and report only failures to obtain one as errors.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Performs a GET request for `url`.
    fn get(&self, url: &Url) -> Result<Response>;
}

/// [`Transport`] backed by `reqwest::blocking::Client`.
///
/// The blocking client runs its own runtime internally; do not call it from
/// inside an async executor's worker thread.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`EntrezError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<Response> {
        let response = self.client.get(url.clone()).send().map_err(|e| {
            if e.is_timeout() {
                error!(url = %url, "Request timed out");
            } else {
                error!(url = %url, error = %e, "Network error during E-utilities request");
            }
            EntrezError::Transport(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().map_err(|e| {
            error!(error = %e, "Failed to read response body");
            EntrezError::Transport(e)
        })?;

        Ok(Response::new(status, headers, body.to_vec()))
    }
}
