//! `vg-core` — foundational types for the vehicle-generation workspace.
//!
//! This crate is a dependency of every other `vg-*` crate.  It has no `vg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `EdgeId`, `RouteId`, `VehicleId`                        |
//! | [`time`]   | `Tick`                                                  |
//! | [`rng`]    | `DemandRng` (the run's shared random source)            |
//! | [`config`] | `DemandConfig`, `DemandMode`, `RunMode`                 |
//! | [`error`]  | `VgError`, `VgResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and configuration.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DemandConfig, DemandMode, RunMode};
pub use error::{VgError, VgResult};
pub use ids::{EdgeId, RouteId, VehicleId};
pub use rng::DemandRng;
pub use time::Tick;
