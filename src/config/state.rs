// Application state module
// Process-lifetime immutable state shared across connections

use hyper::body::Bytes;

use super::types::Config;

/// Application state.
///
/// Everything here is read-only after startup; requests share it through
/// an `Arc` with no locking.
pub struct AppState {
    pub config: Config,
    /// Page bytes served verbatim for GET /
    pub homepage: Bytes,
}

impl AppState {
    pub const fn new(config: Config, homepage: Bytes) -> Self {
        Self { config, homepage }
    }
}
