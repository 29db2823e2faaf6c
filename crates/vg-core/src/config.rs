//! Run configuration.
//!
//! `DemandConfig` is resolved once by the caller (typically loaded from a JSON
//! file by the application crate) and handed to the demand controller's
//! builder.  Nothing in the workspace reads environment variables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::VgError;

/// Default router guard: a random walk longer than this many edges is
/// treated as a topology error rather than looping forever.
pub const DEFAULT_MAX_ROUTE_EDGES: usize = 10_000;

// ── DemandMode ────────────────────────────────────────────────────────────────

/// Overall vehicle-generation strategy.  Fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum DemandMode {
    /// Keep exactly one vehicle circulating.
    Single,
    /// Synthetic sine-shaped demand over the horizon.
    Dynamic,
    /// Replay the pre-recorded linear profile whose file carries `tag`.
    LinearReplay { tag: String },
    /// Replay a randomly chosen real-world recording.
    RealReplay,
}

impl DemandMode {
    pub fn is_replay(&self) -> bool {
        matches!(self, DemandMode::LinearReplay { .. } | DemandMode::RealReplay)
    }
}

impl FromStr for DemandMode {
    type Err = VgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single" => Ok(DemandMode::Single),
            "dynamic" => Ok(DemandMode::Dynamic),
            "real" => Ok(DemandMode::RealReplay),
            other => match other.strip_prefix("linear_") {
                Some(tag) if !tag.is_empty() => {
                    Ok(DemandMode::LinearReplay { tag: tag.to_owned() })
                }
                _ => Err(VgError::UnsupportedDemandMode(other.to_owned())),
            },
        }
    }
}

impl TryFrom<String> for DemandMode {
    type Error = VgError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DemandMode> for String {
    fn from(mode: DemandMode) -> String {
        mode.to_string()
    }
}

impl fmt::Display for DemandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandMode::Single => f.write_str("single"),
            DemandMode::Dynamic => f.write_str("dynamic"),
            DemandMode::LinearReplay { tag } => write!(f, "linear_{tag}"),
            DemandMode::RealReplay => f.write_str("real"),
        }
    }
}

// ── RunMode ───────────────────────────────────────────────────────────────────

/// Whether the run trains a controller or evaluates one.
///
/// Training randomises the phase of the synthetic demand curve; testing keeps
/// it fixed so evaluation runs line up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RunMode {
    Train,
    Test,
}

impl FromStr for RunMode {
    type Err = VgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "train" => Ok(RunMode::Train),
            "test" => Ok(RunMode::Test),
            other => Err(VgError::UnsupportedRunMode(other.to_owned())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Train => f.write_str("train"),
            RunMode::Test => f.write_str("test"),
        }
    }
}

// ── DemandConfig ──────────────────────────────────────────────────────────────

/// Everything the demand controller needs besides the topology, the
/// connector, and the random source.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DemandConfig {
    /// Length of the run in ticks.  Must be positive.
    pub sim_length: u64,

    /// Multiplier on per-tick vehicle counts.  0 disables generation.
    pub scale: f64,

    pub demand_mode: DemandMode,

    pub run_mode: RunMode,

    /// Simulated seconds per tick.  Default: 1.0.
    pub step_length_secs: f64,

    /// Root of the playback file store (`linear/` and `real/` live below it).
    pub playback_dir: PathBuf,

    /// `None` seeds the run's RNG from system entropy.
    pub seed: Option<u64>,

    /// Router guard; see [`DEFAULT_MAX_ROUTE_EDGES`].
    pub max_route_edges: usize,

    /// Check origin-to-destination connectivity before the run starts.
    pub validate_topology: bool,

    /// Vehicle type passed to the engine on insertion.  `None` uses the
    /// engine's default type.
    pub vehicle_type: Option<String>,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            sim_length:        3_600,
            scale:             1.0,
            demand_mode:       DemandMode::Dynamic,
            run_mode:          RunMode::Test,
            step_length_secs:  1.0,
            playback_dir:      PathBuf::from("playback"),
            seed:              None,
            max_route_edges:   DEFAULT_MAX_ROUTE_EDGES,
            validate_topology: false,
            vehicle_type:      None,
        }
    }
}

impl DemandConfig {
    /// Check the preconditions every strategy relies on.
    pub fn validate(&self) -> Result<(), VgError> {
        if self.sim_length == 0 {
            return Err(VgError::Config("sim_length must be positive".into()));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(VgError::Config(format!(
                "scale must be a finite non-negative number, got {}",
                self.scale
            )));
        }
        if !self.step_length_secs.is_finite() || self.step_length_secs <= 0.0 {
            return Err(VgError::Config(format!(
                "step_length_secs must be positive, got {}",
                self.step_length_secs
            )));
        }
        if self.max_route_edges == 0 {
            return Err(VgError::Config("max_route_edges must be positive".into()));
        }
        Ok(())
    }

    /// `true` when this configuration never generates vehicles.
    pub fn is_disabled(&self) -> bool {
        self.scale == 0.0
    }
}
