//! Synthetic four-arm intersection.
//!
//! ```text
//!                n_out   n_in
//!                  ▲       │
//!   w_in  ───►  [  junction  ]  ───►  e_out
//!   w_out ◄───                  ◄───  e_in
//!                  │       ▼
//!                s_in    s_out
//! ```
//!
//! Every approach may leave by any of the three other arms (no U-turns).

#![allow(dead_code)]

use vg_core::{EdgeId, RouteId};
use vg_network::{NetworkTopology, NetworkTopologyBuilder};

pub const ARMS: [&str; 4] = ["n", "e", "s", "w"];

pub fn build_intersection() -> NetworkTopology {
    let mut b = NetworkTopologyBuilder::new();
    for arm in ARMS {
        b.add_origin(format!("{arm}_in")).add_destination(format!("{arm}_out"));
        for other in ARMS.iter().filter(|&&o| o != arm) {
            b.add_connection(format!("{arm}_in"), format!("{other}_out"));
        }
    }
    b.build()
}

/// The twelve movements as engine routes named `r_<from>_<to>`; playback
/// files refer to these.
pub fn movement_routes() -> Vec<(RouteId, Vec<EdgeId>)> {
    let mut routes = Vec::with_capacity(12);
    for from in ARMS {
        for to in ARMS.iter().filter(|&&t| t != from) {
            routes.push((
                RouteId::new(format!("r_{from}_{to}")),
                vec![EdgeId::new(format!("{from}_in")), EdgeId::new(format!("{to}_out"))],
            ));
        }
    }
    routes
}

/// `true` for the four straight-through movements.
pub fn is_through(from: &str, to: &str) -> bool {
    matches!((from, to), ("n", "s") | ("s", "n") | ("e", "w") | ("w", "e"))
}
