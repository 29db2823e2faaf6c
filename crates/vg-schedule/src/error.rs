use std::path::PathBuf;

use thiserror::Error;

use vg_core::RouteId;
use vg_headway::HeadwayError;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule horizon must be at least one tick")]
    ZeroHorizon,

    #[error("scale must be a finite non-negative number, got {0}")]
    InvalidScale(f64),

    #[error("schedule needs origin edges to spawn on, but none were given")]
    NoOrigins,

    #[error("target curve value {0} is not a valid mean headway")]
    InvalidCurve(f64),

    #[error("no playback file matches {pattern:?} in {}", .dir.display())]
    NoCandidates { dir: PathBuf, pattern: String },

    #[error("{count} playback files match {pattern:?} in {}; expected exactly one", .dir.display())]
    Ambiguous { dir: PathBuf, pattern: String, count: usize },

    #[error("route {route}: {reason}")]
    InvalidDepartures { route: RouteId, reason: String },

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Headway(#[from] HeadwayError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
