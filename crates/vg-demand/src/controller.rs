//! The `DemandController` state machine.

use std::mem;

use log::{debug, info};

use vg_core::{DemandRng, EdgeId, RouteId, Tick, VehicleId};
use vg_network::{NetworkError, NetworkTopology, RandomWalkRouter, Router};
use vg_schedule::PlaybackData;

use crate::connector::{palette_color, DepartLane, SimConnector, VehicleSpawn};
use crate::observer::{DemandObserver, NoopObserver, SpawnEvent, SpawnSource};
use crate::{DemandResult, DemandStrategy};

// ── ControllerState ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    /// Generation is disabled (`scale == 0`).
    Idle,
    Generating,
    /// Terminal: nothing more will be spawned this run.
    Exhausted,
}

impl ControllerState {
    pub fn as_str(self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Generating => "generating",
            ControllerState::Exhausted => "exhausted",
        }
    }
}

// ── DemandController ──────────────────────────────────────────────────────────

/// Stepped once per simulation tick; inserts vehicles through a
/// [`SimConnector`].
///
/// | Strategy        | Per step                                                   |
/// |-----------------|------------------------------------------------------------|
/// | `Single`        | one vehicle on a random origin if the network is empty     |
/// | `Dynamic`       | the next schedule entry; `Exhausted` after the last one    |
/// | `*Replay`       | every recorded departure at once, then `Exhausted`         |
///
/// While `Idle`, `Single` spawns nothing, `Dynamic` still consumes its
/// (empty) schedule, and replays go straight to `Exhausted`.
///
/// Create via [`DemandControllerBuilder`][crate::DemandControllerBuilder].
pub struct DemandController<'t, R: Router = RandomWalkRouter> {
    pub(crate) topology:         &'t NetworkTopology,
    pub(crate) router:           R,
    pub(crate) strategy:         DemandStrategy,
    pub(crate) state:            ControllerState,
    pub(crate) tick:             Tick,
    pub(crate) sim_length:       u64,
    pub(crate) step_length_secs: f64,
    pub(crate) vehicle_type:     Option<String>,
    pub(crate) vehicles_created: u64,
    pub(crate) rng:              DemandRng,
}

impl<'t, R: Router> DemandController<'t, R> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The tick the next [`step`](Self::step) will process.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn strategy(&self) -> &DemandStrategy {
        &self.strategy
    }

    /// Vehicles inserted so far; also the counter behind vehicle ids.
    pub fn vehicles_created(&self) -> u64 {
        self.vehicles_created
    }

    pub fn sim_length(&self) -> u64 {
        self.sim_length
    }

    pub fn topology(&self) -> &'t NetworkTopology {
        self.topology
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Process one tick.  Returns the number of vehicles inserted.
    pub fn step<C: SimConnector>(&mut self, conn: &mut C) -> DemandResult<usize> {
        self.step_observed(conn, &mut NoopObserver)
    }

    /// Like [`step`](Self::step), reporting to `observer`.
    pub fn step_observed<C, O>(&mut self, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let now = self.tick;
        let spawned = match self.state {
            ControllerState::Exhausted => 0,
            ControllerState::Idle | ControllerState::Generating => {
                self.dispatch(now, conn, observer)?
            }
        };
        observer.on_tick_end(now, spawned, self.state);
        self.tick = now.next();
        Ok(spawned)
    }

    /// Process exactly `n` ticks from the current one.
    pub fn run_ticks<C, O>(&mut self, n: u64, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let mut total = 0;
        for _ in 0..n {
            total += self.step_observed(conn, observer)?;
        }
        Ok(total)
    }

    /// Process the remaining ticks up to the configured horizon, then call
    /// `on_run_end`.
    pub fn run<C, O>(&mut self, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let remaining = self.sim_length.saturating_sub(self.tick.0);
        let total = self.run_ticks(remaining, conn, observer)?;
        observer.on_run_end(self.tick, self.vehicles_created);
        Ok(total)
    }

    // ── Strategies ────────────────────────────────────────────────────────

    fn dispatch<C, O>(&mut self, now: Tick, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        match self.strategy {
            DemandStrategy::Single => self.step_single(now, conn, observer),
            DemandStrategy::Dynamic(_) => self.step_dynamic(now, conn, observer),
            DemandStrategy::LinearReplay(_) | DemandStrategy::RealReplay(_) => {
                self.step_playback(now, conn, observer)
            }
        }
    }

    fn step_single<C, O>(&mut self, now: Tick, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        if self.state == ControllerState::Idle || conn.vehicle_count()? > 0 {
            return Ok(0);
        }
        let origin = self
            .rng
            .choose(self.topology.origins())
            .cloned()
            .ok_or(NetworkError::NoOrigins)?;
        self.spawn_random_walk(&origin, now, conn, observer)?;
        Ok(1)
    }

    fn step_dynamic<C, O>(&mut self, now: Tick, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let (origins, exhausted) = match &mut self.strategy {
            DemandStrategy::Dynamic(schedule) => (schedule.pull(), schedule.is_exhausted()),
            _ => return Ok(0),
        };
        let origins = origins.unwrap_or_default();
        for origin in &origins {
            self.spawn_random_walk(origin, now, conn, observer)?;
        }
        if exhausted {
            info!("no vehicles left in the dynamic schedule at {now}");
            self.exhaust(now, observer);
        }
        Ok(origins.len())
    }

    fn step_playback<C, O>(&mut self, now: Tick, conn: &mut C, observer: &mut O) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let data = match &mut self.strategy {
            DemandStrategy::LinearReplay(d) | DemandStrategy::RealReplay(d) => mem::take(d),
            _ => return Ok(0),
        };
        let spawned = if self.state == ControllerState::Idle {
            0
        } else {
            self.burst(&data, now, conn, observer)?
        };
        info!("playback burst inserted {spawned} vehicles at {now}");
        self.exhaust(now, observer);
        Ok(spawned)
    }

    fn exhaust<O: DemandObserver>(&mut self, now: Tick, observer: &mut O) {
        self.state = ControllerState::Exhausted;
        observer.on_exhausted(now, self.vehicles_created);
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Walk a route from `origin`, then insert the vehicle on the origin's
    /// single-edge route and install the walk.  Nothing reaches the engine
    /// if routing fails.
    fn spawn_random_walk<C, O>(
        &mut self,
        origin:   &EdgeId,
        now:      Tick,
        conn:     &mut C,
        observer: &mut O,
    ) -> DemandResult<()>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let path = self.router.route(self.topology, origin, &mut self.rng)?;
        let spawn = VehicleSpawn {
            id:           VehicleId::random_walk(origin, self.vehicles_created),
            route:        RouteId::for_origin(origin),
            depart_secs:  now.as_secs(self.step_length_secs),
            depart_lane:  DepartLane::Best,
            vehicle_type: self.vehicle_type.clone(),
        };
        conn.add_vehicle(&spawn)?;
        self.vehicles_created += 1;
        conn.set_vehicle_route(&spawn.id, &path.edges)?;

        let origin_index = self.topology.origins().binary_search(origin).unwrap_or(0);
        conn.set_vehicle_color(&spawn.id, palette_color(origin_index))?;

        debug!("{now}: {} on {} edges from {origin}", spawn.id, path.len());
        observer.on_spawn(&SpawnEvent {
            tick:        now,
            vehicle:     &spawn.id,
            source:      SpawnSource::RandomWalk,
            route:       &spawn.route,
            depart_secs: spawn.depart_secs,
            path:        Some(&path),
        });
        Ok(())
    }

    /// Insert every recorded departure.  Routes are visited in sorted order
    /// and coloured by cycling the palette.
    fn burst<C, O>(
        &mut self,
        data:     &PlaybackData,
        now:      Tick,
        conn:     &mut C,
        observer: &mut O,
    ) -> DemandResult<usize>
    where
        C: SimConnector,
        O: DemandObserver,
    {
        let mut spawned = 0;
        for (i, (route, departures)) in data.iter().enumerate() {
            let color = palette_color(i);
            for &depart_secs in departures {
                let spawn = VehicleSpawn {
                    id:           VehicleId::playback(route, self.vehicles_created),
                    route:        route.clone(),
                    depart_secs,
                    depart_lane:  DepartLane::Best,
                    vehicle_type: self.vehicle_type.clone(),
                };
                conn.add_vehicle(&spawn)?;
                self.vehicles_created += 1;
                conn.set_vehicle_color(&spawn.id, color)?;
                observer.on_spawn(&SpawnEvent {
                    tick:        now,
                    vehicle:     &spawn.id,
                    source:      SpawnSource::Playback,
                    route:       &spawn.route,
                    depart_secs,
                    path:        None,
                });
                spawned += 1;
            }
        }
        Ok(spawned)
    }
}
