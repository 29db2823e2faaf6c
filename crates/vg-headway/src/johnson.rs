//! Johnson SB and SU distributions.
//!
//! Both families transform a standard normal draw `z`:
//!
//! ```text
//! SB (bounded):   x = loc + scale · 1 / (1 + exp(-(z - a) / b))    x ∈ (loc, loc + scale)
//! SU (unbounded): x = loc + scale · sinh((z - a) / b)              x ∈ ℝ
//! ```
//!
//! `a` and `b` are the shape parameters (`b > 0`), `loc`/`scale` the usual
//! location and scale (`scale > 0`).  The parameterisation matches the one
//! the field data was fitted with, so the calibration constants in
//! [`flow_rate`](crate::flow_rate) can be used verbatim.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::HeadwayError;

fn check_params(b: f64, scale: f64) -> Result<(), HeadwayError> {
    if !(b.is_finite() && b > 0.0) {
        return Err(HeadwayError::InvalidParameters(format!("shape b must be positive, got {b}")));
    }
    if !(scale.is_finite() && scale > 0.0) {
        return Err(HeadwayError::InvalidParameters(format!("scale must be positive, got {scale}")));
    }
    Ok(())
}

// ── JohnsonSb ─────────────────────────────────────────────────────────────────

/// Johnson SB: bounded support `(loc, loc + scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JohnsonSb {
    pub(crate) a:     f64,
    pub(crate) b:     f64,
    pub(crate) loc:   f64,
    pub(crate) scale: f64,
}

impl JohnsonSb {
    pub fn new(a: f64, b: f64, loc: f64, scale: f64) -> Result<Self, HeadwayError> {
        check_params(b, scale)?;
        Ok(Self { a, b, loc, scale })
    }

    /// Open support interval `(lower, upper)`.
    pub fn support(&self) -> (f64, f64) {
        (self.loc, self.loc + self.scale)
    }
}

impl Distribution<f64> for JohnsonSb {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        let logistic = 1.0 / (1.0 + (-(z - self.a) / self.b).exp());
        self.loc + self.scale * logistic
    }
}

// ── JohnsonSu ─────────────────────────────────────────────────────────────────

/// Johnson SU: unbounded support.  Draws can be negative; callers clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JohnsonSu {
    pub(crate) a:     f64,
    pub(crate) b:     f64,
    pub(crate) loc:   f64,
    pub(crate) scale: f64,
}

impl JohnsonSu {
    pub fn new(a: f64, b: f64, loc: f64, scale: f64) -> Result<Self, HeadwayError> {
        check_params(b, scale)?;
        Ok(Self { a, b, loc, scale })
    }

    /// Median of the distribution (the image of `z = 0`).
    pub fn median(&self) -> f64 {
        self.loc + self.scale * (-self.a / self.b).sinh()
    }
}

impl Distribution<f64> for JohnsonSu {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = StandardNormal.sample(rng);
        self.loc + self.scale * ((z - self.a) / self.b).sinh()
    }
}

// ── HeadwayDistribution ───────────────────────────────────────────────────────

/// A fitted headway distribution: family plus parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadwayDistribution {
    Sb(JohnsonSb),
    Su(JohnsonSu),
}

impl Distribution<f64> for HeadwayDistribution {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            HeadwayDistribution::Sb(d) => d.sample(rng),
            HeadwayDistribution::Su(d) => d.sample(rng),
        }
    }
}
