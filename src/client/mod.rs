//! # Client Module
//!
//! ```text
//!     client/
//!     ├── mod.rs          (You are here)
//!     ├── config.rs       (Defaults, environment, validation)
//!     ├── core.rs         (EntrezClient operations)
//!     └── transport.rs    (HTTP seam and raw responses)
//! ```

mod config;
mod core;
mod transport;

/// Client configuration and environment variable names
pub use self::config::{ClientConfig, API_KEY_ENV, DEFAULT_TIMEOUT, DEFAULT_TOOL, EMAIL_ENV};

/// The E-utilities client
pub use self::core::EntrezClient;

/// HTTP transport and raw responses
pub use self::transport::{HttpTransport, Response, Transport};
