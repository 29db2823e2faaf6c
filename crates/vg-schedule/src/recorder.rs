//! Turning per-route flow profiles into playback recordings.
//!
//! Each route's timeline is walked one tick (second) at a time.  A tick whose
//! flow is below the model's lowest reference rate produces nothing; any
//! other tick schedules a departure one sampled headway after the later of
//! the previous departure and the current tick, then jumps to that
//! departure's (rounded) tick.

use std::collections::BTreeMap;

use log::info;

use vg_core::{DemandRng, RouteId};
use vg_headway::HeadwayModel;

use crate::{PlaybackData, ScheduleResult};

/// Target flow (vehicles/hour) per route and tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowProfile {
    routes: BTreeMap<RouteId, Vec<f64>>,
}

impl FlowProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flow of `route` at `tick`, padding skipped ticks with 0.
    pub fn set(&mut self, route: RouteId, tick: usize, flow_vph: f64) -> &mut Self {
        let flows = self.routes.entry(route).or_default();
        if flows.len() <= tick {
            flows.resize(tick + 1, 0.0);
        }
        flows[tick] = flow_vph;
        self
    }

    /// Set a whole timeline for `route`.
    pub fn insert(&mut self, route: RouteId, flows: Vec<f64>) -> &mut Self {
        self.routes.insert(route, flows);
        self
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Longest route timeline, in ticks.
    pub fn horizon(&self) -> usize {
        self.routes.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn flows(&self, route: &RouteId) -> Option<&[f64]> {
        self.routes.get(route).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &[f64])> {
        self.routes.iter().map(|(r, f)| (r, f.as_slice()))
    }
}

/// Sample departure times for every route in `profile`.
pub fn record_playback(
    profile: &FlowProfile,
    model: &HeadwayModel,
    rng: &mut DemandRng,
) -> ScheduleResult<PlaybackData> {
    let floor = model.lowest_rate();
    let mut routes = BTreeMap::new();

    for (route, flows) in profile.iter() {
        let mut departures: Vec<f64> = Vec::new();
        let mut t = 0usize;
        while t < flows.len() {
            let flow = flows[t];
            if flow < floor {
                t += 1;
                continue;
            }
            // Chain from the previous departure, but never from before `t`:
            // after a low-flow gap the chain restarts at the current tick.
            let base = departures.last().map_or(t as f64, |&last| last.max(t as f64));
            let departure = base + model.sample_headway(flow, rng)?;
            departures.push(departure);
            t = t.max(departure.round() as usize);
        }
        routes.insert(route.clone(), departures);
    }

    let data = PlaybackData::new(routes)?;
    info!(
        "recorded playback: {} routes, {} vehicles over {} ticks",
        data.route_count(),
        data.vehicle_count(),
        profile.horizon()
    );
    Ok(data)
}
