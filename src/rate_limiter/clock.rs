//! # Time Sources
//!
//! The limiter never reads the system time directly. It asks a [`Clock`] for
//! "now" and asks the same clock to sleep, so tests can substitute a clock
//! they control.
//!
//! ```text
//!     Clock implementations:
//!
//!     SystemClock:
//!     ├─ now()   : monotonic Instant elapsed since construction
//!     └─ sleep() : std::thread::sleep
//!
//!     ManualClock:
//!     ├─ now()   : whatever the test set it to
//!     └─ sleep() : records the duration and advances now() instantly
//! ```
//!
//! Times are expressed as a [`Duration`] since the clock's own epoch. Only
//! differences between two readings of the same clock are meaningful.

use parking_lot::Mutex;
use std::fmt;
use std::time::{Duration, Instant};

/// A source of monotonic time that can also block the caller.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current time as an offset from the clock's epoch.
    fn now(&self) -> Duration;

    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Real clock backed by [`Instant`].
///
/// Using a monotonic base means wall-clock adjustments (NTP steps, manual
/// changes) never shorten or lengthen a rate-limit wait.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is the moment of construction.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// A clock driven entirely by the caller.
///
/// `sleep` returns immediately after advancing the clock by the requested
/// duration, and every requested sleep is recorded so tests can assert on it.
///
/// ## Example
///
/// ```rust
/// use entrez_client::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// clock.advance(Duration::from_millis(250));
/// clock.sleep(Duration::from_millis(750));
///
/// assert_eq!(clock.now(), Duration::from_secs(1));
/// assert_eq!(clock.sleeps(), vec![Duration::from_millis(750)]);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(by);
    }

    /// Sets the clock to an absolute reading.
    ///
    /// Setting an earlier reading than the current one simulates a clock that
    /// went backwards.
    pub fn set(&self, to: Duration) {
        *self.now.lock() = to;
    }

    /// Returns every duration passed to [`Clock::sleep`], in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Returns the sum of all recorded sleeps.
    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let mut last = clock.now();

        for _ in 0..10 {
            std::thread::sleep(Duration::from_millis(1));
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_system_clock_sleep() {
        let clock = SystemClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_millis(20));
        assert!(clock.now() - before >= Duration::from_millis(20));
    }

    #[test]
    fn test_system_clock_zero_sleep_returns() {
        let clock = SystemClock::default();
        clock.sleep(Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(1500));
        assert_eq!(clock.now(), Duration::from_millis(1500));

        clock.set(Duration::from_millis(200));
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn test_manual_clock_records_sleeps() {
        let clock = ManualClock::new();
        clock.sleep(Duration::from_millis(100));
        clock.sleep(Duration::from_millis(300));

        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_millis(100), Duration::from_millis(300)]
        );
        assert_eq!(clock.total_slept(), Duration::from_millis(400));
        assert_eq!(clock.now(), Duration::from_millis(400));
    }
}
