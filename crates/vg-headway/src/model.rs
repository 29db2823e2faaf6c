//! The headway model: interpolation between reference distributions.

use rand_distr::Distribution;

use vg_core::DemandRng;

use crate::{FlowRateSample, HeadwayDistribution, HeadwayError, HeadwayResult};

/// Upper bound on a rescaled low-flow headway, in seconds.  Flow is normally
/// measured over 15-minute windows, so longer gaps carry no meaning.
pub const MAX_HEADWAY_SECS: f64 = 900.0;

/// One row of the model table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadwayBin {
    pub rate_vph:     f64,
    pub distribution: HeadwayDistribution,
}

/// Where a requested flow rate falls relative to the reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// At or below the lowest rate: rescale a lowest-bin draw by `factor`.
    Below { factor: f64 },
    /// Blend `(1 - ratio) · draw(lower) + ratio · draw(upper)`.
    Between { lower: usize, upper: usize, ratio: f64 },
    /// Above the highest rate: rescale a highest-bin draw by `factor`.
    Above { factor: f64 },
}

/// Samples the time gap until the next arrival at a requested flow rate.
///
/// Stateless apart from the random source passed to every call.
#[derive(Debug, Clone)]
pub struct HeadwayModel {
    bins: Vec<HeadwayBin>,
}

impl Default for HeadwayModel {
    fn default() -> Self {
        Self::calibrated()
    }
}

impl HeadwayModel {
    /// The model fitted to field data (see [`FlowRateSample`]).
    pub fn calibrated() -> Self {
        let bins = FlowRateSample::ALL
            .iter()
            .map(|s| HeadwayBin { rate_vph: s.rate_vph(), distribution: s.distribution() })
            .collect();
        Self { bins }
    }

    /// A model over a custom table.  Rates must be positive and strictly
    /// ascending.
    pub fn new(bins: Vec<HeadwayBin>) -> HeadwayResult<Self> {
        if bins.is_empty() {
            return Err(HeadwayError::Table("at least one reference rate is required".into()));
        }
        if !bins.iter().all(|b| b.rate_vph.is_finite() && b.rate_vph > 0.0) {
            return Err(HeadwayError::Table("reference rates must be positive".into()));
        }
        if !bins.windows(2).all(|w| w[0].rate_vph < w[1].rate_vph) {
            return Err(HeadwayError::Table("reference rates must be strictly ascending".into()));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[HeadwayBin] {
        &self.bins
    }

    pub fn lowest_rate(&self) -> f64 {
        self.bins[0].rate_vph
    }

    pub fn highest_rate(&self) -> f64 {
        self.bins[self.bins.len() - 1].rate_vph
    }

    /// Lowest flow rate the model accepts: half the lowest reference rate.
    pub fn min_rate(&self) -> f64 {
        self.lowest_rate() / 2.0
    }

    /// Locate `rate_vph` in the table without drawing anything.
    pub fn bracket(&self, rate_vph: f64) -> HeadwayResult<Bracket> {
        if !rate_vph.is_finite() || rate_vph <= 0.0 {
            return Err(HeadwayError::InvalidRate(rate_vph));
        }
        if rate_vph < self.min_rate() {
            return Err(HeadwayError::BelowFloor { rate: rate_vph, floor: self.min_rate() });
        }

        let lowest = self.lowest_rate();
        if rate_vph <= lowest {
            return Ok(Bracket::Below { factor: lowest / rate_vph });
        }

        // First bin whose rate is >= the request; `lowest < rate` so idx >= 1.
        let idx = self.bins.partition_point(|b| b.rate_vph < rate_vph);
        if idx == self.bins.len() {
            return Ok(Bracket::Above { factor: self.highest_rate() / rate_vph });
        }
        let r0 = self.bins[idx - 1].rate_vph;
        let r1 = self.bins[idx].rate_vph;
        Ok(Bracket::Between { lower: idx - 1, upper: idx, ratio: (rate_vph - r0) / (r1 - r0) })
    }

    /// Draw a headway in seconds for a target flow of `rate_vph` vehicles/hour.
    ///
    /// # Errors
    ///
    /// [`HeadwayError::BelowFloor`] if `rate_vph` is under
    /// [`min_rate`](Self::min_rate); [`HeadwayError::InvalidRate`] for
    /// non-finite or non-positive input.
    pub fn sample_headway(&self, rate_vph: f64, rng: &mut DemandRng) -> HeadwayResult<f64> {
        let headway = match self.bracket(rate_vph)? {
            Bracket::Below { factor } => {
                let draw = self.bins[0].distribution.sample(rng.inner());
                (draw * factor).clamp(0.0, MAX_HEADWAY_SECS)
            }
            Bracket::Between { lower, upper, ratio } => {
                let lo = self.bins[lower].distribution.sample(rng.inner());
                let hi = self.bins[upper].distribution.sample(rng.inner());
                ((1.0 - ratio) * lo + ratio * hi).max(0.0)
            }
            Bracket::Above { factor } => {
                let last = self.bins.len() - 1;
                let draw = self.bins[last].distribution.sample(rng.inner());
                (draw * factor).max(0.0)
            }
        };
        Ok(headway)
    }
}
