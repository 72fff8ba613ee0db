//! # Rate Limiter Configuration
//!
//! Settings for the sliding-window admission policy. A window is described by
//! two numbers: how many requests may be admitted, and how long the window is.
//!
//! ```text
//!     Sliding Window (max_requests = 3, window = 1s):
//!
//!     t=0.00  ──► admit #1
//!     t=0.10  ──► admit #2
//!     t=0.20  ──► admit #3
//!     t=0.30  ──► wait 0.70s ──► admit #4 at t=1.00
//!                 (#1 must fall out of the window first)
//! ```
//!
//! NCBI allows 3 requests per second without an API key and 10 requests per
//! second with one. Both presets are provided.

use std::time::Duration;

/// Requests per second NCBI permits for anonymous clients.
pub const NCBI_REQUESTS_PER_SECOND: usize = 3;

/// Requests per second NCBI permits for clients that send an `api_key`.
pub const NCBI_KEYED_REQUESTS_PER_SECOND: usize = 10;

/// Configuration for a [`RateLimiter`](super::RateLimiter).
///
/// ## Examples
///
/// ```rust
/// use entrez_client::RateLimiterConfig;
/// use std::time::Duration;
///
/// // The anonymous NCBI limit: 3 requests per rolling second
/// let config = RateLimiterConfig::ncbi_default();
/// assert_eq!(config.max_requests, 3);
///
/// // A custom window
/// let config = RateLimiterConfig::new(5, Duration::from_millis(500));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of admissions inside any rolling window.
    ///
    /// This is also the length of the admission history ring; only this many
    /// timestamps are ever kept.
    pub max_requests: usize,

    /// Length of the rolling window.
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    /// Returns the anonymous NCBI limit (3 requests per second).
    fn default() -> Self {
        Self::ncbi_default()
    }
}

impl RateLimiterConfig {
    /// Creates a configuration admitting `max_requests` per `window`.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Creates a configuration for `requests_per_second` over a one second window.
    ///
    /// ```rust
    /// use entrez_client::RateLimiterConfig;
    ///
    /// let config = RateLimiterConfig::per_second(10);
    /// assert_eq!(config.effective_rate_per_second(), 10.0);
    /// ```
    pub fn per_second(requests_per_second: usize) -> Self {
        Self::new(requests_per_second, Duration::from_secs(1))
    }

    /// The limit NCBI applies to clients without an API key.
    pub fn ncbi_default() -> Self {
        Self::per_second(NCBI_REQUESTS_PER_SECOND)
    }

    /// The limit NCBI applies to clients that identify with an API key.
    pub fn ncbi_with_api_key() -> Self {
        Self::per_second(NCBI_KEYED_REQUESTS_PER_SECOND)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message if:
    /// - `max_requests` is 0 (nothing could ever be admitted)
    /// - `window` is zero (the limiter would never constrain anything)
    ///
    /// ```rust
    /// use entrez_client::RateLimiterConfig;
    /// use std::time::Duration;
    ///
    /// assert!(RateLimiterConfig::new(0, Duration::from_secs(1)).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_requests == 0 {
            return Err("max_requests must be greater than 0");
        }

        if self.window.is_zero() {
            return Err("window must be greater than 0");
        }

        Ok(())
    }

    /// Returns the sustained rate this configuration allows per second.
    pub fn effective_rate_per_second(&self) -> f64 {
        if self.window.is_zero() {
            0.0
        } else {
            self.max_requests as f64 / self.window.as_secs_f64()
        }
    }
}
