//! The simulation-engine seam.
//!
//! The demand controller never owns the engine; it is handed a fully
//! initialised [`SimConnector`] on every call.  [`RecordingConnector`] is an
//! in-memory implementation for tests and offline runs.

use std::collections::BTreeMap;
use std::fmt;

use vg_core::{EdgeId, RouteId, VehicleId};

use crate::{ConnectorError, ConnectorResult};

// ── Rgb ───────────────────────────────────────────────────────────────────────

/// Display colour of a vehicle in the engine's GUI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const GREEN:  Rgb = Rgb { r: 0,   g: 255, b: 0 };
    pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };
    pub const RED:    Rgb = Rgb { r: 255, g: 0,   b: 0 };
}

/// Colours assigned to routes (and origins) in cyclic order.
pub const ROUTE_PALETTE: [Rgb; 3] = [Rgb::GREEN, Rgb::YELLOW, Rgb::RED];

/// Palette colour for the `i`th route.
pub fn palette_color(i: usize) -> Rgb {
    ROUTE_PALETTE[i % ROUTE_PALETTE.len()]
}

// ── Vehicle insertion ─────────────────────────────────────────────────────────

/// Lane a vehicle departs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DepartLane {
    /// The lane the engine judges best for the vehicle's route.
    #[default]
    Best,
    Free,
    Random,
    Index(u32),
}

impl fmt::Display for DepartLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartLane::Best => f.write_str("best"),
            DepartLane::Free => f.write_str("free"),
            DepartLane::Random => f.write_str("random"),
            DepartLane::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Everything the engine needs to insert one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSpawn {
    pub id:           VehicleId,
    /// A route already registered with the engine.
    pub route:        RouteId,
    /// Departure time in simulated seconds.
    pub depart_secs:  f64,
    pub depart_lane:  DepartLane,
    /// `None` uses the engine's default vehicle type.
    pub vehicle_type: Option<String>,
}

// ── SimConnector ──────────────────────────────────────────────────────────────

/// Vehicle-insertion primitives of the simulation engine.
pub trait SimConnector {
    /// Register a named route.
    fn add_route(&mut self, id: &RouteId, edges: &[EdgeId]) -> ConnectorResult<()>;

    /// Insert a vehicle on a registered route.
    fn add_vehicle(&mut self, spawn: &VehicleSpawn) -> ConnectorResult<()>;

    /// Replace the remaining route of a vehicle already inserted.
    fn set_vehicle_route(&mut self, id: &VehicleId, edges: &[EdgeId]) -> ConnectorResult<()>;

    fn set_vehicle_color(&mut self, id: &VehicleId, color: Rgb) -> ConnectorResult<()>;

    /// Current route (edge list) of a vehicle.
    fn get_route(&self, id: &VehicleId) -> ConnectorResult<Vec<EdgeId>>;

    /// Number of vehicles currently in the simulation.
    fn vehicle_count(&self) -> ConnectorResult<usize>;
}

// ── RecordingConnector ────────────────────────────────────────────────────────

/// State of one vehicle inside a [`RecordingConnector`].
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleRecord {
    pub spawn: VehicleSpawn,
    pub edges: Vec<EdgeId>,
    pub color: Option<Rgb>,
}

/// In-memory [`SimConnector`] that records every call.
///
/// Vehicles stay "in the simulation" until [`remove_vehicle`] is called, so
/// tests can emulate arrivals.
///
/// [`remove_vehicle`]: RecordingConnector::remove_vehicle
#[derive(Debug, Default)]
pub struct RecordingConnector {
    routes:   BTreeMap<RouteId, Vec<EdgeId>>,
    vehicles: BTreeMap<VehicleId, VehicleRecord>,
    inserted: Vec<VehicleId>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, id: &RouteId) -> Option<&[EdgeId]> {
        self.routes.get(id).map(Vec::as_slice)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn vehicle(&self, id: &VehicleId) -> Option<&VehicleRecord> {
        self.vehicles.get(id)
    }

    /// Vehicles still in the simulation, by id.
    pub fn vehicles(&self) -> impl Iterator<Item = &VehicleRecord> {
        self.vehicles.values()
    }

    /// Every vehicle id ever inserted, in insertion order.
    pub fn inserted(&self) -> &[VehicleId] {
        &self.inserted
    }

    /// Take a vehicle out of the simulation (it arrived, or was teleported).
    pub fn remove_vehicle(&mut self, id: &VehicleId) -> ConnectorResult<VehicleRecord> {
        self.vehicles
            .remove(id)
            .ok_or_else(|| ConnectorError::UnknownVehicle(id.clone()))
    }

    /// Remove every vehicle; returns how many were removed.
    pub fn clear_vehicles(&mut self) -> usize {
        let n = self.vehicles.len();
        self.vehicles.clear();
        n
    }

    fn record_mut(&mut self, id: &VehicleId) -> ConnectorResult<&mut VehicleRecord> {
        self.vehicles
            .get_mut(id)
            .ok_or_else(|| ConnectorError::UnknownVehicle(id.clone()))
    }
}

impl SimConnector for RecordingConnector {
    fn add_route(&mut self, id: &RouteId, edges: &[EdgeId]) -> ConnectorResult<()> {
        if self.routes.contains_key(id) {
            return Err(ConnectorError::DuplicateRoute(id.clone()));
        }
        self.routes.insert(id.clone(), edges.to_vec());
        Ok(())
    }

    fn add_vehicle(&mut self, spawn: &VehicleSpawn) -> ConnectorResult<()> {
        if self.vehicles.contains_key(&spawn.id) {
            return Err(ConnectorError::DuplicateVehicle(spawn.id.clone()));
        }
        let edges = self
            .routes
            .get(&spawn.route)
            .ok_or_else(|| ConnectorError::UnknownRoute(spawn.route.clone()))?
            .clone();
        self.vehicles.insert(
            spawn.id.clone(),
            VehicleRecord { spawn: spawn.clone(), edges, color: None },
        );
        self.inserted.push(spawn.id.clone());
        Ok(())
    }

    fn set_vehicle_route(&mut self, id: &VehicleId, edges: &[EdgeId]) -> ConnectorResult<()> {
        if edges.is_empty() {
            return Err(ConnectorError::EmptyRoute(id.clone()));
        }
        self.record_mut(id)?.edges = edges.to_vec();
        Ok(())
    }

    fn set_vehicle_color(&mut self, id: &VehicleId, color: Rgb) -> ConnectorResult<()> {
        self.record_mut(id)?.color = Some(color);
        Ok(())
    }

    fn get_route(&self, id: &VehicleId) -> ConnectorResult<Vec<EdgeId>> {
        self.vehicles
            .get(id)
            .map(|v| v.edges.clone())
            .ok_or_else(|| ConnectorError::UnknownVehicle(id.clone()))
    }

    fn vehicle_count(&self) -> ConnectorResult<usize> {
        Ok(self.vehicles.len())
    }
}
