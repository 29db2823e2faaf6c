//! Observer hooks for spawn events and tick progress.

use vg_core::{RouteId, Tick, VehicleId};
use vg_network::Route;

use crate::ControllerState;

/// How a vehicle got its route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnSource {
    RandomWalk,
    Playback,
}

impl SpawnSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SpawnSource::RandomWalk => "random_walk",
            SpawnSource::Playback => "playback",
        }
    }
}

/// One vehicle inserted into the simulation.
#[derive(Debug, Clone, Copy)]
pub struct SpawnEvent<'a> {
    /// Tick on which the controller inserted the vehicle.
    pub tick:        Tick,
    pub vehicle:     &'a VehicleId,
    pub source:      SpawnSource,
    /// Engine route the vehicle was inserted on.
    pub route:       &'a RouteId,
    pub depart_secs: f64,
    /// The walked path for random-walk vehicles; `None` for playback, whose
    /// path is the recorded route itself.
    pub path:        Option<&'a Route>,
}

/// Callbacks invoked by [`DemandController`][crate::DemandController].
///
/// All methods default to no-ops.
pub trait DemandObserver {
    fn on_spawn(&mut self, _event: &SpawnEvent<'_>) {}

    /// Called after every step, including steps that do nothing.
    fn on_tick_end(&mut self, _tick: Tick, _spawned: usize, _state: ControllerState) {}

    /// Called once, on the tick the controller becomes exhausted.
    fn on_exhausted(&mut self, _tick: Tick, _vehicles_created: u64) {}

    /// Called by [`DemandController::run`][crate::DemandController::run] after
    /// the final tick.
    fn on_run_end(&mut self, _final_tick: Tick, _vehicles_created: u64) {}
}

/// A [`DemandObserver`] that does nothing.
pub struct NoopObserver;

impl DemandObserver for NoopObserver {}
