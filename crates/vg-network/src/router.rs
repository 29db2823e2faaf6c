//! Routing trait and the default random-walk implementation.
//!
//! # Pluggability
//!
//! `vg-demand` calls routing via the [`Router`] trait, so applications can
//! swap in a shortest-path or turn-ratio router without touching the
//! controller.  The default [`RandomWalkRouter`] picks a uniformly random
//! outgoing edge at every step until it stands on a destination.

use vg_core::{DemandRng, EdgeId};
use vg_core::config::DEFAULT_MAX_ROUTE_EDGES;

use crate::{NetworkError, NetworkTopology};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered list of edges from an origin to a destination, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub edges: Vec<EdgeId>,
}

impl Route {
    pub fn origin(&self) -> Option<&EdgeId> {
        self.edges.first()
    }

    pub fn destination(&self) -> Option<&EdgeId> {
        self.edges.last()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable route assignment for newly spawned vehicles.
pub trait Router {
    /// Compute a route starting at `origin` and ending on a destination edge.
    fn route(
        &self,
        topology: &NetworkTopology,
        origin:   &EdgeId,
        rng:      &mut DemandRng,
    ) -> Result<Route, NetworkError>;
}

// ── RandomWalkRouter ──────────────────────────────────────────────────────────

/// Uniform random walk over outgoing edges.
///
/// A walk that grows past `max_edges` fails with
/// [`NetworkError::RouteTooLong`] instead of looping forever on a topology
/// with a destination-free cycle.  Sinks that are not destinations fail
/// immediately with [`NetworkError::DeadEnd`].
#[derive(Debug, Clone, Copy)]
pub struct RandomWalkRouter {
    pub max_edges: usize,
}

impl RandomWalkRouter {
    pub fn new(max_edges: usize) -> Self {
        Self { max_edges }
    }
}

impl Default for RandomWalkRouter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUTE_EDGES)
    }
}

impl Router for RandomWalkRouter {
    fn route(
        &self,
        topology: &NetworkTopology,
        origin:   &EdgeId,
        rng:      &mut DemandRng,
    ) -> Result<Route, NetworkError> {
        let mut edges = vec![origin.clone()];
        let mut current = origin;

        while !topology.is_destination(current) {
            if edges.len() >= self.max_edges {
                return Err(NetworkError::RouteTooLong {
                    origin:    origin.clone(),
                    max_edges: self.max_edges,
                });
            }
            let next = rng
                .choose(topology.outgoing(current))
                .ok_or_else(|| NetworkError::DeadEnd { edge: current.clone() })?;
            edges.push(next.clone());
            current = next;
        }

        Ok(Route { edges })
    }
}
