//! Generation strategies.

use std::fmt;

use vg_schedule::{DemandSchedule, PlaybackData};

/// The strategy a controller dispatches to every tick.  Chosen once, when
/// the controller is built.
#[derive(Debug, Clone)]
pub enum DemandStrategy {
    /// One vehicle on a random origin whenever the network is empty.
    Single,
    /// Pull the next tick's origin list from a precomputed schedule.
    Dynamic(DemandSchedule),
    /// Insert every recorded departure of a linear profile at once.
    LinearReplay(PlaybackData),
    /// Insert every recorded departure of a real recording at once.
    RealReplay(PlaybackData),
}

impl DemandStrategy {
    pub fn is_replay(&self) -> bool {
        matches!(self, DemandStrategy::LinearReplay(_) | DemandStrategy::RealReplay(_))
    }

    /// `true` for strategies that route vehicles with a random walk.
    pub fn is_random_walk(&self) -> bool {
        !self.is_replay()
    }

    pub fn schedule(&self) -> Option<&DemandSchedule> {
        match self {
            DemandStrategy::Dynamic(s) => Some(s),
            _ => None,
        }
    }

    pub fn playback(&self) -> Option<&PlaybackData> {
        match self {
            DemandStrategy::LinearReplay(d) | DemandStrategy::RealReplay(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for DemandStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandStrategy::Single => f.write_str("single"),
            DemandStrategy::Dynamic(_) => f.write_str("dynamic"),
            DemandStrategy::LinearReplay(_) => f.write_str("linear replay"),
            DemandStrategy::RealReplay(_) => f.write_str("real replay"),
        }
    }
}
