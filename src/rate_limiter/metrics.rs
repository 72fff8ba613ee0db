//! Admission statistics for a rate limiter.
//!
//! ```text
//!     Limiter Metrics:
//!     ┌─────────────────────────────────────┐
//!     │  Admitted: 120                      │
//!     │  Delayed:   37  (30.8%)             │
//!     │  Total Wait: 21.4s                  │
//!     │  Max Wait:    0.98s                 │
//!     └─────────────────────────────────────┘
//! ```

use std::fmt;
use std::time::Duration;

/// A snapshot of how a limiter has behaved since creation or the last reset.
///
/// ## Example
///
/// ```rust
/// use entrez_client::{ManualClock, RateLimiter, RateLimiterConfig};
/// use std::sync::Arc;
///
/// let limiter = RateLimiter::with_clock(
///     RateLimiterConfig::ncbi_default(),
///     Arc::new(ManualClock::new()),
/// );
/// for _ in 0..4 {
///     limiter.admit();
/// }
///
/// let metrics = limiter.metrics();
/// assert_eq!(metrics.total_admitted, 4);
/// assert_eq!(metrics.total_delayed, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimiterMetrics {
    /// Number of admissions granted.
    pub total_admitted: u64,

    /// Number of admissions that had to wait for the window to open.
    pub total_delayed: u64,

    /// Sum of all waits imposed on callers.
    pub total_wait: Duration,

    /// Longest single wait imposed on a caller.
    pub max_wait: Duration,
}

impl LimiterMetrics {
    /// Fraction of admissions that waited, between 0.0 and 1.0.
    #[inline]
    pub fn delay_rate(&self) -> f64 {
        if self.total_admitted == 0 {
            0.0
        } else {
            self.total_delayed as f64 / self.total_admitted as f64
        }
    }

    /// Mean wait over the admissions that were delayed.
    pub fn average_wait(&self) -> Duration {
        if self.total_delayed == 0 {
            return Duration::ZERO;
        }
        let delayed = u32::try_from(self.total_delayed).unwrap_or(u32::MAX);
        self.total_wait / delayed
    }

    /// Records one admission and the wait it incurred.
    pub(crate) fn record(&mut self, wait: Duration) {
        self.total_admitted += 1;
        if !wait.is_zero() {
            self.total_delayed += 1;
            self.total_wait = self.total_wait.saturating_add(wait);
            self.max_wait = self.max_wait.max(wait);
        }
    }

    /// Generates a human-readable summary.
    ///
    /// ```text
    /// Limiter Metrics:
    /// ├─ Admitted: 120
    /// ├─ Delayed: 37 (30.83%)
    /// ├─ Total Wait: 21.400s
    /// ├─ Average Wait: 0.578s
    /// └─ Max Wait: 0.980s
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "Limiter Metrics:\n\
             ├─ Admitted: {}\n\
             ├─ Delayed: {} ({:.2}%)\n\
             ├─ Total Wait: {:.3}s\n\
             ├─ Average Wait: {:.3}s\n\
             └─ Max Wait: {:.3}s",
            self.total_admitted,
            self.total_delayed,
            self.delay_rate() * 100.0,
            self.total_wait.as_secs_f64(),
            self.average_wait().as_secs_f64(),
            self.max_wait.as_secs_f64(),
        )
    }
}

impl fmt::Display for LimiterMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let metrics = LimiterMetrics::default();
        assert_eq!(metrics.delay_rate(), 0.0);
        assert_eq!(metrics.average_wait(), Duration::ZERO);
    }

    #[test]
    fn test_record() {
        let mut metrics = LimiterMetrics::default();
        metrics.record(Duration::ZERO);
        metrics.record(Duration::from_millis(300));
        metrics.record(Duration::from_millis(700));
        metrics.record(Duration::ZERO);

        assert_eq!(metrics.total_admitted, 4);
        assert_eq!(metrics.total_delayed, 2);
        assert_eq!(metrics.total_wait, Duration::from_secs(1));
        assert_eq!(metrics.max_wait, Duration::from_millis(700));
        assert_eq!(metrics.average_wait(), Duration::from_millis(500));
        assert_eq!(metrics.delay_rate(), 0.5);
    }

    #[test]
    fn test_summary_and_display() {
        let mut metrics = LimiterMetrics::default();
        metrics.record(Duration::from_millis(250));

        let summary = metrics.summary();
        assert!(summary.contains("Admitted: 1"));
        assert!(summary.contains("Delayed: 1 (100.00%)"));
        assert!(summary.contains("Max Wait: 0.250s"));
        assert_eq!(format!("{}", metrics), summary);
    }
}
