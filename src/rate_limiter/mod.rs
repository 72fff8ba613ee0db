//! # Rate Limiter Module
//!
//! Admission control shared by every request the client sends.
//!
//! ## Module Structure
//!
//! ```text
//!     rate_limiter/
//!     ├── mod.rs          (You are here - Module organization)
//!     ├── clock.rs        (Time sources: real and manual)
//!     ├── config.rs       (Window size and request count)
//!     ├── core.rs         (Sliding-window limiter)
//!     └── metrics.rs      (Admission statistics)
//! ```
//!
//! ## Architecture Flow
//!
//! ```text
//!     EntrezClient::perform
//!          │
//!          ▼
//!     ┌─────────┐
//!     │  Core   │ ◄── admit(): decide + record under one lock
//!     └────┬────┘
//!          │
//!          ▼
//!     ┌─────────┐
//!     │  Clock  │ ◄── now() / sleep()
//!     └─────────┘
//! ```

mod clock;
mod config;
mod core;
mod metrics;

/// Time sources used to measure the window and to block callers
pub use self::clock::{Clock, ManualClock, SystemClock};

/// Window configuration and the NCBI presets
pub use self::config::{NCBI_KEYED_REQUESTS_PER_SECOND, NCBI_REQUESTS_PER_SECOND, RateLimiterConfig};

/// Sliding-window limiter
pub use self::core::RateLimiter;

/// Admission statistics
pub use self::metrics::LimiterMetrics;
