//! Error types for the Entrez client.

use thiserror::Error;

/// Errors that can occur when configuring the client or talking to E-utilities.
#[derive(Debug, Error)]
pub enum EntrezError {
    /// Required configuration is missing or invalid.
    ///
    /// Raised while building a client, never while serving a request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A search-term operator other than `AND` or `OR` was supplied.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// The base URL could not be parsed or joined with an endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP layer failed (connection, TLS, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// E-utilities answered with a non-success status.
    ///
    /// Only produced by [`Response::error_for_status`](crate::Response::error_for_status);
    /// the client itself hands every response back unmodified.
    #[error("E-utilities returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },
}

impl EntrezError {
    /// Returns `true` for errors raised before any request could be built.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EntrezError::Configuration(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EntrezError>;
