//! Strongly typed identifier wrappers.
//!
//! Edge, route, and vehicle identifiers come from the simulation engine's
//! network files and are free-form strings.  Wrapping them keeps an edge from
//! being passed where a route is expected.  All ids are `Ord + Hash` so they
//! can key `BTreeMap`s (deterministic iteration) and `HashMap`s alike.

use std::borrow::Borrow;
use std::fmt;

/// Generate a typed string id wrapper.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id! {
    /// A directed road-network edge.
    pub struct EdgeId;
}

typed_id! {
    /// A named route registered with the simulation engine.
    pub struct RouteId;
}

typed_id! {
    /// A vehicle inserted into the simulation.
    pub struct VehicleId;
}

impl RouteId {
    /// The single-edge route registered for an origin edge.  Shares the
    /// edge's name.
    pub fn for_origin(origin: &EdgeId) -> Self {
        RouteId(origin.0.clone())
    }
}

impl VehicleId {
    /// Id of the `n`th vehicle overall, spawned on `origin` by a random-walk
    /// strategy.
    pub fn random_walk(origin: &EdgeId, n: u64) -> Self {
        VehicleId(format!("{origin}_{n}"))
    }

    /// Id of the `n`th vehicle overall, replayed on the recorded `route`.
    pub fn playback(route: &RouteId, n: u64) -> Self {
        VehicleId(format!("v_{route}_{n}"))
    }
}
