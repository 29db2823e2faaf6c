//! Network-subsystem error type.

use thiserror::Error;

use vg_core::EdgeId;

/// Errors produced by `vg-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("edge {edge} has no outgoing edges and is not a destination")]
    DeadEnd { edge: EdgeId },

    #[error("random walk from {origin} exceeded {max_edges} edges without reaching a destination")]
    RouteTooLong { origin: EdgeId, max_edges: usize },

    #[error("edge {edge} is reachable from an origin but cannot reach any destination")]
    Unreachable { edge: EdgeId },

    #[error("topology has no origin edges")]
    NoOrigins,

    #[error("topology parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
