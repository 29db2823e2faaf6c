use thiserror::Error;

use vg_core::{RouteId, VehicleId, VgError};
use vg_network::NetworkError;
use vg_schedule::ScheduleError;

/// Failures reported by a [`SimConnector`](crate::SimConnector).
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("route {0} is not known to the simulation")]
    UnknownRoute(RouteId),

    #[error("route {0} is already registered")]
    DuplicateRoute(RouteId),

    #[error("vehicle {0} is not in the simulation")]
    UnknownVehicle(VehicleId),

    #[error("vehicle {0} is already in the simulation")]
    DuplicateVehicle(VehicleId),

    #[error("vehicle {0} has an empty route")]
    EmptyRoute(VehicleId),

    #[error("simulation engine error: {0}")]
    Engine(String),
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error(transparent)]
    Config(#[from] VgError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("connector error: {0}")]
    Connector(#[from] ConnectorError),
}

pub type DemandResult<T> = Result<T, DemandError>;
