//! JSON topology loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "origins":      ["n_in", "s_in"],
//!   "destinations": ["n_out", "s_out"],
//!   "edges": {
//!     "n_in":  { "outgoing": ["s_out", "e_out"] },
//!     "s_in":  { "outgoing": ["n_out"] },
//!     "n_out": { "outgoing": [] }
//!   }
//! }
//! ```
//!
//! Edges absent from `edges` have no outgoing connections.  Extra per-edge
//! fields written by network export tools are ignored.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use vg_core::EdgeId;

use crate::{NetworkError, NetworkTopology, NetworkTopologyBuilder};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TopologyRecord {
    origins:      Vec<EdgeId>,
    destinations: Vec<EdgeId>,
    #[serde(default)]
    edges:        BTreeMap<EdgeId, EdgeRecord>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    #[serde(default)]
    outgoing: Vec<EdgeId>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`NetworkTopology`] from a JSON file.
pub fn load_topology_json(path: &Path) -> Result<NetworkTopology, NetworkError> {
    let file = std::fs::File::open(path)?;
    let topology = load_topology_reader(std::io::BufReader::new(file))?;
    info!(
        "Loaded topology {}: {} origins, {} destinations, {} edges",
        path.display(),
        topology.origins().len(),
        topology.destination_count(),
        topology.edge_count()
    );
    Ok(topology)
}

/// Like [`load_topology_json`] but accepts any `Read` source.
pub fn load_topology_reader<R: Read>(reader: R) -> Result<NetworkTopology, NetworkError> {
    let record: TopologyRecord =
        serde_json::from_reader(reader).map_err(|e| NetworkError::Parse(e.to_string()))?;

    let mut b = NetworkTopologyBuilder::new();
    for origin in record.origins {
        b.add_origin(origin);
    }
    for dest in record.destinations {
        b.add_destination(dest);
    }
    for (edge, rec) in record.edges {
        b.set_outgoing(edge, rec.outgoing);
    }
    Ok(b.build())
}
