//! `vg-network` — read-only road topology and random-walk routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`topology`] | `NetworkTopology`, `NetworkTopologyBuilder`                |
//! | [`loader`]   | `load_topology_json`, `load_topology_reader`               |
//! | [`router`]   | `Router` trait, `Route`, `RandomWalkRouter`                |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for edge lookups.                |

pub mod error;
pub mod loader;
pub mod router;
pub mod topology;


pub use error::{NetworkError, NetworkResult};
pub use loader::{load_topology_json, load_topology_reader};
pub use router::{RandomWalkRouter, Route, Router};
pub use topology::{NetworkTopology, NetworkTopologyBuilder};
