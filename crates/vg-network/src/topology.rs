//! Road topology representation and builder.
//!
//! # Data layout
//!
//! The graph is edge-centric: vehicles are inserted on edges, routes are
//! sequences of edges, and the only relation the router needs is "which
//! edges can follow this one".  Each edge maps to its outgoing-edge list;
//! origins are kept as a sorted `Vec` so uniform sampling is a slice pick.
//!
//! A topology is loaded once per run and never mutated afterwards.  The
//! controller borrows it for the whole run.

use std::collections::VecDeque;

use log::debug;

use vg_core::EdgeId;

use crate::{NetworkError, NetworkResult};

#[cfg(feature = "fx-hash")]
pub(crate) type EdgeMap<V> = rustc_hash::FxHashMap<EdgeId, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type EdgeMap<V> = std::collections::HashMap<EdgeId, V>;

#[cfg(feature = "fx-hash")]
pub(crate) type EdgeSet = rustc_hash::FxHashSet<EdgeId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type EdgeSet = std::collections::HashSet<EdgeId>;

// ── NetworkTopology ───────────────────────────────────────────────────────────

/// Read-only view of the road graph: where vehicles enter, where they leave,
/// and which edges follow which.
///
/// Do not construct directly; use [`NetworkTopologyBuilder`] or one of the
/// [loaders](crate::loader).
pub struct NetworkTopology {
    /// Entry edges, sorted and de-duplicated.
    origins: Vec<EdgeId>,
    destinations: EdgeSet,
    adjacency: EdgeMap<Vec<EdgeId>>,
}

impl NetworkTopology {
    pub fn origins(&self) -> &[EdgeId] {
        &self.origins
    }

    pub fn is_origin(&self, edge: &EdgeId) -> bool {
        self.origins.binary_search(edge).is_ok()
    }

    pub fn is_destination(&self, edge: &EdgeId) -> bool {
        self.destinations.contains(edge)
    }

    pub fn destination_count(&self) -> usize {
        self.destinations.len()
    }

    /// Outgoing edges of `edge`.  Empty for unknown edges and sinks.
    pub fn outgoing(&self, edge: &EdgeId) -> &[EdgeId] {
        self.adjacency.get(edge).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges with an adjacency entry.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Check the routing precondition: every edge reachable from an origin
    /// must be able to reach some destination.
    ///
    /// Runs a reverse breadth-first search from all destinations, then a
    /// forward search from all origins; the first forward-reached edge the
    /// reverse search never saw is reported.  O(E) in both passes.
    pub fn validate(&self) -> NetworkResult<()> {
        if self.origins.is_empty() {
            return Err(NetworkError::NoOrigins);
        }

        // Reverse adjacency: edge → predecessors.
        let mut incoming: EdgeMap<Vec<&EdgeId>> = EdgeMap::default();
        for (from, outs) in &self.adjacency {
            for to in outs {
                incoming.entry(to.clone()).or_default().push(from);
            }
        }

        let mut reaches_exit: EdgeSet = EdgeSet::default();
        let mut queue: VecDeque<&EdgeId> = self.destinations.iter().collect();
        reaches_exit.extend(self.destinations.iter().cloned());
        while let Some(edge) = queue.pop_front() {
            for &pred in incoming.get(edge).map(Vec::as_slice).unwrap_or(&[]) {
                if reaches_exit.insert(pred.clone()) {
                    queue.push_back(pred);
                }
            }
        }

        let mut seen: EdgeSet = self.origins.iter().cloned().collect();
        let mut queue: VecDeque<&EdgeId> = self.origins.iter().collect();
        while let Some(edge) = queue.pop_front() {
            if !reaches_exit.contains(edge) {
                return Err(NetworkError::Unreachable { edge: edge.clone() });
            }
            // Vehicles leave the network at a destination.
            if self.is_destination(edge) {
                continue;
            }
            for next in self.outgoing(edge) {
                if seen.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
        }

        debug!(
            "topology valid: {} origins, {} edges reachable",
            self.origins.len(),
            seen.len()
        );
        Ok(())
    }
}

// ── NetworkTopologyBuilder ────────────────────────────────────────────────────

/// Construct a [`NetworkTopology`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use vg_network::NetworkTopologyBuilder;
///
/// let mut b = NetworkTopologyBuilder::new();
/// b.add_origin("A").add_destination("D");
/// b.add_connection("A", "B").add_connection("B", "D");
/// let topo = b.build();
/// assert_eq!(topo.origins().len(), 1);
/// assert_eq!(topo.outgoing(&"A".into()).len(), 1);
/// ```
#[derive(Default)]
pub struct NetworkTopologyBuilder {
    origins: Vec<EdgeId>,
    destinations: EdgeSet,
    adjacency: EdgeMap<Vec<EdgeId>>,
}

impl NetworkTopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_origin(&mut self, edge: impl Into<EdgeId>) -> &mut Self {
        self.origins.push(edge.into());
        self
    }

    pub fn add_destination(&mut self, edge: impl Into<EdgeId>) -> &mut Self {
        self.destinations.insert(edge.into());
        self
    }

    /// Add a **directed** connection: vehicles on `from` may continue onto
    /// `to`.  Duplicate connections are kept; they weight the random walk.
    pub fn add_connection(&mut self, from: impl Into<EdgeId>, to: impl Into<EdgeId>) -> &mut Self {
        self.adjacency.entry(from.into()).or_default().push(to.into());
        self
    }

    /// Replace the full outgoing list of `edge`.
    pub fn set_outgoing(&mut self, edge: impl Into<EdgeId>, outgoing: Vec<EdgeId>) -> &mut Self {
        self.adjacency.insert(edge.into(), outgoing);
        self
    }

    /// Consume the builder and produce a [`NetworkTopology`].
    pub fn build(self) -> NetworkTopology {
        let mut origins = self.origins;
        origins.sort_unstable();
        origins.dedup();
        NetworkTopology {
            origins,
            destinations: self.destinations,
            adjacency: self.adjacency,
        }
    }
}
