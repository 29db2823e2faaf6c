//! `vg-demand` — the per-tick demand controller.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`connector`]  | `SimConnector` trait, `VehicleSpawn`, `Rgb`, `RecordingConnector` |
//! | [`strategy`]   | `DemandStrategy`                                                |
//! | [`controller`] | `DemandController`, `ControllerState`                           |
//! | [`builder`]    | `DemandControllerBuilder`                                       |
//! | [`observer`]   | `DemandObserver`, `SpawnEvent`, `NoopObserver`                  |
//! | [`error`]      | `DemandError`, `ConnectorError`                                 |
//!
//! # State machine
//!
//! ```text
//!            scale == 0                 scale > 0
//!               Idle                   Generating
//!                 │  schedule consumed /    │
//!                 │  replay step            │  schedule consumed / burst done
//!                 └──────────► Exhausted ◄──┘
//! ```
//!
//! `Exhausted` is terminal and not an error: later steps return 0.

pub mod builder;
pub mod connector;
pub mod controller;
pub mod error;
pub mod observer;
pub mod strategy;


pub use builder::{effective_mode, DemandControllerBuilder};
pub use connector::{
    palette_color, DepartLane, RecordingConnector, Rgb, SimConnector, VehicleRecord, VehicleSpawn,
    ROUTE_PALETTE,
};
pub use controller::{ControllerState, DemandController};
pub use error::{ConnectorError, ConnectorResult, DemandError, DemandResult};
pub use observer::{DemandObserver, NoopObserver, SpawnEvent, SpawnSource};
pub use strategy::DemandStrategy;
