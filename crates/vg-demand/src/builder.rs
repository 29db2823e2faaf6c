//! Fluent builder for constructing a [`DemandController`].

use std::slice;

use log::{info, warn};

use vg_core::{DemandConfig, DemandMode, DemandRng, RouteId, RunMode, Tick, VgError};
use vg_network::{NetworkError, NetworkTopology, RandomWalkRouter, Router};
use vg_schedule::{build_dynamic_schedule, PlaybackData, PlaybackStore, ProfileKind};

use crate::connector::SimConnector;
use crate::{ControllerState, DemandController, DemandResult, DemandStrategy};

/// Fluent builder for [`DemandController<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                              |
/// |-----------------------|------------------------------------------------------|
/// | `.router(r)`          | `RandomWalkRouter::new(config.max_route_edges)`      |
/// | `.rng(r)`             | `DemandRng::from_optional_seed(config.seed)`         |
/// | `.playback_store(s)`  | `PlaybackStore::new(&config.playback_dir)`           |
///
/// # Example
///
/// ```rust,ignore
/// let mut conn = RecordingConnector::new();
/// let mut ctrl = DemandControllerBuilder::new(config, &topology).build(&mut conn)?;
/// for _ in 0..config.sim_length {
///     ctrl.step(&mut conn)?;
/// }
/// ```
pub struct DemandControllerBuilder<'t, R: Router = RandomWalkRouter> {
    config:   DemandConfig,
    topology: &'t NetworkTopology,
    router:   R,
    rng:      Option<DemandRng>,
    store:    Option<PlaybackStore>,
}

impl<'t> DemandControllerBuilder<'t, RandomWalkRouter> {
    pub fn new(config: DemandConfig, topology: &'t NetworkTopology) -> Self {
        Self {
            router: RandomWalkRouter::new(config.max_route_edges),
            config,
            topology,
            rng: None,
            store: None,
        }
    }
}

impl<'t, R: Router> DemandControllerBuilder<'t, R> {
    /// Route new vehicles with `router` instead of the random walk.
    pub fn router<R2: Router>(self, router: R2) -> DemandControllerBuilder<'t, R2> {
        DemandControllerBuilder {
            config:   self.config,
            topology: self.topology,
            router,
            rng:      self.rng,
            store:    self.store,
        }
    }

    pub fn rng(mut self, rng: DemandRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn playback_store(mut self, store: PlaybackStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Validate the configuration, register one single-edge route per origin
    /// with `conn`, select the strategy, and return a ready controller.
    ///
    /// Dynamic schedules are computed and playback files loaded here, so all
    /// precondition failures surface before the first tick.
    pub fn build<C: SimConnector>(self, conn: &mut C) -> DemandResult<DemandController<'t, R>> {
        let config = self.config;
        config.validate()?;
        if config.validate_topology {
            self.topology.validate()?;
        }

        let mut rng = self.rng.unwrap_or_else(|| DemandRng::from_optional_seed(config.seed));
        let disabled = config.is_disabled();
        let origins = self.topology.origins();
        if origins.is_empty() && !disabled {
            return Err(NetworkError::NoOrigins.into());
        }

        for origin in origins {
            conn.add_route(&RouteId::for_origin(origin), slice::from_ref(origin))?;
        }

        let mode = effective_mode(&config.demand_mode, config.run_mode);
        let strategy = match &mode {
            DemandMode::Single => DemandStrategy::Single,
            DemandMode::Dynamic => {
                let sim_length = usize::try_from(config.sim_length).map_err(|_| {
                    VgError::Config(format!("sim_length {} does not fit in memory", config.sim_length))
                })?;
                DemandStrategy::Dynamic(build_dynamic_schedule(
                    sim_length,
                    config.scale,
                    config.run_mode,
                    origins,
                    &mut rng,
                )?)
            }
            DemandMode::LinearReplay { .. } | DemandMode::RealReplay => {
                let data = if disabled {
                    PlaybackData::default()
                } else {
                    let store = self
                        .store
                        .unwrap_or_else(|| PlaybackStore::new(config.playback_dir.clone()));
                    match ProfileKind::from_demand_mode(&mode) {
                        Some((kind, tag)) => store.load_playback_schedule(kind, tag, &mut rng)?,
                        None => PlaybackData::default(),
                    }
                };
                if matches!(mode, DemandMode::RealReplay) {
                    DemandStrategy::RealReplay(data)
                } else {
                    DemandStrategy::LinearReplay(data)
                }
            }
        };

        let state = if disabled {
            warn!("scale is 0: demand generation disabled");
            ControllerState::Idle
        } else {
            ControllerState::Generating
        };
        info!(
            "demand controller: {strategy} strategy, {} origins, {} ticks, scale {}",
            origins.len(),
            config.sim_length,
            config.scale
        );

        Ok(DemandController {
            topology: self.topology,
            router: self.router,
            strategy,
            state,
            tick: Tick::ZERO,
            sim_length: config.sim_length,
            step_length_secs: config.step_length_secs,
            vehicle_type: config.vehicle_type,
            vehicles_created: 0,
            rng,
        })
    }
}

/// Training runs never replay recordings; they fall back to synthetic demand.
/// `single` is kept as is.
pub fn effective_mode(mode: &DemandMode, run_mode: RunMode) -> DemandMode {
    if run_mode == RunMode::Train && mode.is_replay() {
        info!("{mode} demand is evaluation-only; training on dynamic demand instead");
        DemandMode::Dynamic
    } else {
        mode.clone()
    }
}
