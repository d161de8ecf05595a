//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the page and API handlers, decoupled
//! from specific business logic.

pub mod query;
pub mod response;

// Re-export commonly used functions
pub use query::{parse_int_prefix, parse_query};
pub use response::{build_html_response, build_not_found_response};
