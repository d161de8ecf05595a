//! Request handler module
//!
//! Routing dispatch for the three-case surface: the page, the query API
//! and the fixed 404 fallthrough.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
