//! Simulation time.
//!
//! Time is a monotonically increasing `Tick` counter advanced once per
//! simulation step by the external driver.  Converting to seconds needs the
//! engine's step length (`DemandConfig::step_length_secs`, normally 1 s).

use std::fmt;

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// The next tick.
    #[inline]
    pub fn next(self) -> Tick {
        self.offset(1)
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn as_secs(self, step_length_secs: f64) -> f64 {
        self.0 as f64 * step_length_secs
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
