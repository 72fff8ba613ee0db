//! # Sliding-Window Rate Limiter
//!
//! Admission control for a remote service that tolerates at most
//! `max_requests` requests in any rolling `window`.
//!
//! ## The Algorithm
//!
//! ```text
//!     History ring (max_requests = 3):
//!
//!     ┌───────┬───────┬───────┐
//!     │ 0.00s │ 0.10s │ 0.20s │   oldest ──► newest
//!     └───────┴───────┴───────┘
//!
//!     admit() at 0.30s:
//!       ready_at = oldest + window = 1.00s
//!       wait     = ready_at - now  = 0.70s   (never below zero)
//!       record 1.00s, evict 0.00s
//!
//!     ┌───────┬───────┬───────┐
//!     │ 0.10s │ 0.20s │ 1.00s │
//!     └───────┴───────┴───────┘
//! ```
//!
//! The decision, the sleep and the append all happen under one lock, so two
//! threads can never both see an open window for the same slot. The recorded
//! timestamp is read from the clock *after* the sleep returns: a sleep that
//! overshoots pushes the admission later, never earlier, and the next caller
//! measures its window from when this one actually left.

use super::{
    clock::{Clock, SystemClock},
    config::RateLimiterConfig,
    metrics::LimiterMetrics,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Mutable limiter state, always accessed under the limiter's mutex.
#[derive(Debug)]
struct WindowState {
    /// Admission times, oldest first. Never longer than `max_requests`.
    history: VecDeque<Duration>,
    metrics: LimiterMetrics,
}

impl WindowState {
    fn new(max_requests: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_requests),
            metrics: LimiterMetrics::default(),
        }
    }

    /// How long a request arriving at `now` must wait.
    #[inline]
    fn wait_at(&self, now: Duration, max_requests: usize, window: Duration) -> Duration {
        if self.history.len() < max_requests {
            return Duration::ZERO;
        }
        match self.history.front() {
            Some(oldest) => oldest.saturating_add(window).saturating_sub(now),
            None => Duration::ZERO,
        }
    }

    /// `now`, but never before the newest recorded admission.
    #[inline]
    fn admission_time(&self, now: Duration) -> Duration {
        match self.history.back() {
            Some(newest) => now.max(*newest),
            None => now,
        }
    }

    fn record(&mut self, admitted_at: Duration, wait: Duration, max_requests: usize) {
        if self.history.len() == max_requests {
            self.history.pop_front();
        }
        self.history.push_back(admitted_at);
        self.metrics.record(wait);
    }
}

/// Blocking sliding-window rate limiter.
///
/// One limiter is meant to be shared by everything that talks to the same
/// remote service, typically through an `Arc`.
///
/// ## Example
///
/// ```rust
/// use entrez_client::{ManualClock, RateLimiter, RateLimiterConfig};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(ManualClock::new());
/// let limiter = RateLimiter::with_clock(RateLimiterConfig::ncbi_default(), clock.clone());
///
/// // The first three admissions are immediate
/// for _ in 0..3 {
///     assert_eq!(limiter.admit(), Duration::ZERO);
/// }
///
/// // 300ms later the fourth has to wait for the first to leave the window
/// clock.advance(Duration::from_millis(300));
/// assert_eq!(limiter.admit(), Duration::from_millis(700));
/// ```
pub struct RateLimiter {
    state: Mutex<WindowState>,
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Creates a limiter admitting `max_requests` per `window`, using the
    /// system clock.
    ///
    /// # Panics
    ///
    /// Panics if either value is zero. Use [`RateLimiter::try_with_clock`] to
    /// handle invalid settings.
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::with_config(RateLimiterConfig::new(max_requests, window))
    }

    /// Creates a limiter with the anonymous NCBI limit (3 per second).
    pub fn ncbi() -> Self {
        Self::with_config(RateLimiterConfig::ncbi_default())
    }

    /// Creates a limiter from a configuration, using the system clock.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (see
    /// [`RateLimiterConfig::validate`]).
    pub fn with_config(config: RateLimiterConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Creates a limiter driven by the given clock.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn with_clock(config: RateLimiterConfig, clock: Arc<dyn Clock>) -> Self {
        match Self::try_with_clock(config, clock) {
            Ok(limiter) => limiter,
            Err(msg) => panic!("Invalid rate limiter configuration: {msg}"),
        }
    }

    /// Creates a limiter driven by the given clock, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation message if the configuration is invalid.
    pub fn try_with_clock(
        config: RateLimiterConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, &'static str> {
        config.validate()?;

        Ok(Self {
            state: Mutex::new(WindowState::new(config.max_requests)),
            max_requests: config.max_requests,
            window: config.window,
            clock,
        })
    }

    /// Blocks until a request may be issued without exceeding the limit.
    ///
    /// Returns how long the caller was made to wait; zero means the window
    /// was open.
    ///
    /// ```text
    ///     admit() flow:
    ///
    ///     lock ──► fewer than max_requests recorded? ──Yes──► record now ──► unlock
    ///                       │
    ///                       No
    ///                       ▼
    ///              wait = oldest + window - now  (clamped at 0)
    ///                       │
    ///                       ▼
    ///              sleep(wait) ──► record now ──► unlock
    /// ```
    ///
    /// Callers arriving during the sleep queue on the lock and are admitted
    /// one after another.
    pub fn admit(&self) -> Duration {
        let mut state = self.state.lock();
        let wait = state.wait_at(self.clock.now(), self.max_requests, self.window);

        if wait.is_zero() {
            trace!("Admitted immediately");
        } else {
            debug!(
                wait_ms = wait.as_millis() as u64,
                max_requests = self.max_requests,
                "Rate limit window full, sleeping"
            );
            self.clock.sleep(wait);
        }

        let admitted_at = state.admission_time(self.clock.now());
        state.record(admitted_at, wait, self.max_requests);
        wait
    }

    /// Admits only if no waiting is required.
    ///
    /// Returns `None` when the admission was granted. Otherwise nothing is
    /// recorded and the wait [`RateLimiter::admit`] would have imposed is
    /// returned.
    ///
    /// ```rust
    /// use entrez_client::{ManualClock, RateLimiter, RateLimiterConfig};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// let limiter = RateLimiter::with_clock(
    ///     RateLimiterConfig::new(1, Duration::from_secs(1)),
    ///     Arc::new(ManualClock::new()),
    /// );
    /// assert_eq!(limiter.try_admit(), None);
    /// assert_eq!(limiter.try_admit(), Some(Duration::from_secs(1)));
    /// ```
    pub fn try_admit(&self) -> Option<Duration> {
        let mut state = self.state.lock();
        let now = self.clock.now();
        let wait = state.wait_at(now, self.max_requests, self.window);

        if wait.is_zero() {
            let admitted_at = state.admission_time(now);
            state.record(admitted_at, wait, self.max_requests);
            None
        } else {
            Some(wait)
        }
    }

    /// Returns how long an admission requested right now would wait.
    pub fn time_until_ready(&self) -> Duration {
        let state = self.state.lock();
        state.wait_at(self.clock.now(), self.max_requests, self.window)
    }

    /// Returns the configuration this limiter enforces.
    pub fn config(&self) -> RateLimiterConfig {
        RateLimiterConfig::new(self.max_requests, self.window)
    }

    /// Returns a snapshot of the admission statistics.
    pub fn metrics(&self) -> LimiterMetrics {
        self.state.lock().metrics.clone()
    }

    /// Number of admission timestamps currently retained.
    ///
    /// Never exceeds `max_requests`.
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Forgets all recorded admissions and statistics.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.history.clear();
        state.metrics = LimiterMetrics::default();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::ncbi()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_requests", &self.max_requests)
            .field("window", &self.window)
            .field("recorded", &self.history_len())
            .finish()
    }
}
