//! Synthetic (dynamic) demand schedules.
//!
//! # Construction
//!
//! ```text
//! curve[t]   = sin(π + π · t / (n - 1)) + 1.55          mean headway (s), t ∈ [0, n)
//! counts[t]  = arrivals whose exponential headways fit in the running 1 s budget
//! counts     = counts.rotate_left(shift)                 0 in test runs, uniform in train runs
//! counts[n-60..] = 0
//! ticks[t]   = ⌊scale · counts[t]⌋ origins drawn with replacement
//! ```
//!
//! The curve dips to 0.55 s at mid-horizon, so demand rises, peaks, and
//! falls.  The budget remainder carries across ticks, so the long-run count
//! matches the curve without per-tick rounding.

use std::f64::consts::PI;
use std::mem;

use log::{debug, info};
use rand_distr::{Distribution, Exp};

use vg_core::{DemandRng, EdgeId, RunMode};

use crate::{ScheduleError, ScheduleResult};

/// Ticks at the end of every dynamic schedule that never spawn vehicles.
pub const TAIL_ZERO_TICKS: usize = 60;

/// Offset that keeps the sine curve strictly positive.
pub const CURVE_OFFSET: f64 = 1.55;

// ── Target curve ──────────────────────────────────────────────────────────────

/// Mean headway (seconds) for each of `n` ticks: one half period of a sine
/// wave from π to 2π, shifted up by [`CURVE_OFFSET`].
pub fn target_curve(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![PI.sin() + CURVE_OFFSET],
        _ => {
            let step = PI / (n - 1) as f64;
            (0..n).map(|i| (PI + step * i as f64).sin() + CURVE_OFFSET).collect()
        }
    }
}

/// Discrete arrival count per tick for a curve of mean headways.
///
/// Exponential headways are subtracted from a 1 s budget until it is
/// exhausted; every draw that leaves the budget positive is one arrival.
/// The (non-positive) remainder is carried into the next tick.
pub fn arrival_counts(curve: &[f64], rng: &mut DemandRng) -> ScheduleResult<Vec<u32>> {
    let mut counts = Vec::with_capacity(curve.len());
    let mut budget = 1.0_f64;
    for &mean in curve {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(ScheduleError::InvalidCurve(mean));
        }
        let exp = Exp::new(1.0 / mean).map_err(|_| ScheduleError::InvalidCurve(mean))?;
        let mut n = 0u32;
        while budget > 0.0 {
            budget -= exp.sample(rng.inner());
            if budget > 0.0 {
                n += 1;
            }
        }
        budget += 1.0;
        counts.push(n);
    }
    Ok(counts)
}

// ── ShiftPolicy ───────────────────────────────────────────────────────────────

/// Circular phase shift applied to the arrival counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ShiftPolicy {
    /// Keep the curve's phase (evaluation runs).
    #[default]
    None,
    /// Rotate left by a fixed number of ticks (modulo the horizon).
    Fixed(usize),
    /// Rotate left by a uniform draw from `0..horizon` (training runs).
    Random,
}

impl ShiftPolicy {
    pub fn for_run_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Train => ShiftPolicy::Random,
            RunMode::Test => ShiftPolicy::None,
        }
    }

    fn resolve(self, len: usize, rng: &mut DemandRng) -> usize {
        match self {
            ShiftPolicy::None => 0,
            ShiftPolicy::Fixed(k) => k % len,
            ShiftPolicy::Random => rng.gen_range(0..len),
        }
    }
}

// ── DemandSchedule ────────────────────────────────────────────────────────────

/// A precomputed per-tick spawn list, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct DemandSchedule {
    ticks:  Vec<Vec<EdgeId>>,
    counts: Vec<u32>,
    shift:  usize,
    cursor: usize,
}

impl DemandSchedule {
    /// A schedule from explicit per-tick origin lists, without shift.
    pub fn from_ticks(ticks: Vec<Vec<EdgeId>>) -> Self {
        let counts = ticks.iter().map(|t| t.len() as u32).collect();
        Self { ticks, counts, shift: 0, cursor: 0 }
    }

    /// Horizon in ticks (consumed or not).
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// The phase shift that was applied, in ticks.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Arrival counts after shift and tail zeroing, before `scale`.
    pub fn base_counts(&self) -> &[u32] {
        &self.counts
    }

    /// Origin lists for every tick.  Entries already pulled are empty.
    pub fn entries(&self) -> &[Vec<EdgeId>] {
        &self.ticks
    }

    /// Vehicles still to be spawned.
    pub fn remaining_vehicles(&self) -> usize {
        self.ticks[self.cursor..].iter().map(Vec::len).sum()
    }

    /// Ticks not yet pulled.
    pub fn remaining_ticks(&self) -> usize {
        self.ticks.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ticks.len()
    }

    /// Take the next tick's origin list, or `None` once every tick has been
    /// pulled.
    pub fn pull(&mut self) -> Option<Vec<EdgeId>> {
        let entry = self.ticks.get_mut(self.cursor)?;
        self.cursor += 1;
        Some(mem::take(entry))
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for a [`DemandSchedule`].
///
/// ```rust
/// use vg_core::{DemandRng, EdgeId};
/// use vg_schedule::{DynamicScheduleBuilder, ShiftPolicy};
///
/// let origins = [EdgeId::from("n_in"), EdgeId::from("s_in")];
/// let schedule = DynamicScheduleBuilder::new(600)
///     .scale(1.5)
///     .shift(ShiftPolicy::None)
///     .build(&origins, &mut DemandRng::seeded(1))
///     .unwrap();
/// assert_eq!(schedule.len(), 600);
/// assert!(schedule.entries()[540..].iter().all(Vec::is_empty));
/// ```
#[derive(Debug, Clone)]
pub struct DynamicScheduleBuilder {
    sim_length: usize,
    scale:      f64,
    shift:      ShiftPolicy,
}

impl DynamicScheduleBuilder {
    pub fn new(sim_length: usize) -> Self {
        Self { sim_length, scale: 1.0, shift: ShiftPolicy::None }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn shift(mut self, shift: ShiftPolicy) -> Self {
        self.shift = shift;
        self
    }

    pub fn run_mode(self, mode: RunMode) -> Self {
        self.shift(ShiftPolicy::for_run_mode(mode))
    }

    pub fn build(self, origins: &[EdgeId], rng: &mut DemandRng) -> ScheduleResult<DemandSchedule> {
        let n = self.sim_length;
        if n == 0 {
            return Err(ScheduleError::ZeroHorizon);
        }
        if !(self.scale.is_finite() && self.scale >= 0.0) {
            return Err(ScheduleError::InvalidScale(self.scale));
        }

        let mut counts = arrival_counts(&target_curve(n), rng)?;
        let shift = self.shift.resolve(n, rng);
        counts.rotate_left(shift);
        let tail = n.saturating_sub(TAIL_ZERO_TICKS);
        counts[tail..].fill(0);

        let mut ticks = Vec::with_capacity(n);
        for &count in &counts {
            let k = if count == 0 { 0 } else { (self.scale * f64::from(count)) as usize };
            let mut tick = Vec::with_capacity(k);
            for _ in 0..k {
                let origin = rng.choose(origins).ok_or(ScheduleError::NoOrigins)?;
                tick.push(origin.clone());
            }
            ticks.push(tick);
        }

        let schedule = DemandSchedule { ticks, counts, shift, cursor: 0 };
        debug!("dynamic schedule: shift policy {:?} resolved to {shift}", self.shift);
        info!(
            "dynamic schedule built: {n} ticks, {} vehicles, shift {shift}",
            schedule.remaining_vehicles()
        );
        Ok(schedule)
    }
}

/// Build a dynamic schedule with the phase policy implied by `run_mode`.
pub fn build_dynamic_schedule(
    sim_length: usize,
    scale: f64,
    run_mode: RunMode,
    origins: &[EdgeId],
    rng: &mut DemandRng,
) -> ScheduleResult<DemandSchedule> {
    DynamicScheduleBuilder::new(sim_length).scale(scale).run_mode(run_mode).build(origins, rng)
}
