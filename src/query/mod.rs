//! # Query Construction
//!
//! Everything needed to turn structured input into an E-utilities request
//! URL, with no I/O.
//!
//! ```text
//!     query/
//!     ├── mod.rs       (You are here)
//!     ├── endpoint.rs  (Endpoint paths, URL assembly)
//!     ├── params.rs    (Ordered parameters, values, list flattening)
//!     └── term.rs      (Search-term grammar and operators)
//! ```

mod endpoint;
mod params;
mod term;

pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub(crate) use endpoint::request_url;
pub use params::{Params, Value};
pub use term::{convert_search_terms, Operator, SearchTerm, SearchTerms};
