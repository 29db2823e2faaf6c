//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `VgError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// Configuration and parsing failures shared by all `vg-*` crates.
#[derive(Debug, Error)]
pub enum VgError {
    #[error("unsupported demand mode {0:?}: expected \"single\", \"dynamic\", \"linear_<tag>\", or \"real\"")]
    UnsupportedDemandMode(String),

    #[error("unsupported run mode {0:?}: expected \"train\" or \"test\"")]
    UnsupportedRunMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `vg-core`.
pub type VgResult<T> = Result<T, VgError>;
