//! The seven calibrated reference flow rates.
//!
//! Each reference rate (vehicles/hour) is bound to the headway distribution
//! fitted to field measurements taken at that rate.  Low and medium flows
//! (≤ 800 v/h) fit Johnson SB with a 0.85 s lower bound; saturated flows fit
//! Johnson SU.  These are configuration constants; nothing re-fits them at
//! runtime.

use crate::johnson::{HeadwayDistribution, JohnsonSb, JohnsonSu};

/// A reference flow rate with a fitted headway distribution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowRateSample {
    Vph60,
    Vph200,
    Vph500,
    Vph800,
    Vph1100,
    Vph1400,
    Vph1700,
}

impl FlowRateSample {
    /// All reference rates in ascending order.
    pub const ALL: [FlowRateSample; 7] = [
        FlowRateSample::Vph60,
        FlowRateSample::Vph200,
        FlowRateSample::Vph500,
        FlowRateSample::Vph800,
        FlowRateSample::Vph1100,
        FlowRateSample::Vph1400,
        FlowRateSample::Vph1700,
    ];

    /// Flow rate in vehicles/hour.
    pub const fn rate_vph(self) -> f64 {
        match self {
            FlowRateSample::Vph60   => 60.0,
            FlowRateSample::Vph200  => 200.0,
            FlowRateSample::Vph500  => 500.0,
            FlowRateSample::Vph800  => 800.0,
            FlowRateSample::Vph1100 => 1100.0,
            FlowRateSample::Vph1400 => 1400.0,
            FlowRateSample::Vph1700 => 1700.0,
        }
    }

    /// The fitted headway distribution (seconds) at this rate.
    pub const fn distribution(self) -> HeadwayDistribution {
        match self {
            FlowRateSample::Vph60   => sb(0.3, 1.8, 0.85, 130.0),
            FlowRateSample::Vph200  => sb(0.9, 0.71, 0.85, 60.0),
            FlowRateSample::Vph500  => sb(2.49, 0.71, 0.85, 104.57),
            FlowRateSample::Vph800  => sb(3.71, 0.98, 0.85, 104.57),
            FlowRateSample::Vph1100 => su(-2.18, 1.15, 0.8, 0.52),
            FlowRateSample::Vph1400 => su(-2.54, 1.31, 0.47, 0.46),
            FlowRateSample::Vph1700 => su(-2.49, 1.49, 0.55, 0.49),
        }
    }
}

const fn sb(a: f64, b: f64, loc: f64, scale: f64) -> HeadwayDistribution {
    HeadwayDistribution::Sb(JohnsonSb { a, b, loc, scale })
}

const fn su(a: f64, b: f64, loc: f64, scale: f64) -> HeadwayDistribution {
    HeadwayDistribution::Su(JohnsonSu { a, b, loc, scale })
}
