//! intersection: vehicle demand for a single four-arm junction.
//!
//! Drives a `DemandController` against the in-memory `RecordingConnector`
//! and writes every spawn plus a per-tick summary to CSV.  Vehicles leave
//! the network after a fixed travel time per edge, which is what lets the
//! `single` mode keep inserting.
//!
//! ```text
//! intersection [config.json] [topology.json]
//! ```
//!
//! Without arguments the built-in intersection runs one hour of `dynamic`
//! demand.  To replay a recording, first write one with `record_playback`
//! and set `"demand_mode": "linear_<tag>"` in the config.

mod network;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use env_logger::{Builder, Env};
use log::info;

use vg_core::{DemandConfig, DemandMode, VehicleId};
use vg_demand::{DemandControllerBuilder, DemandObserver, RecordingConnector, SimConnector};
use vg_network::load_topology_json;
use vg_output::{CsvWriter, DemandOutputObserver};

use network::{build_intersection, movement_routes};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64  = 42;
const SIM_LENGTH:       u64  = 3_600; // 1 tick = 1 s
const SECS_PER_EDGE:    f64  = 12.0;
const OUTPUT_DIR:       &str = "output/intersection";

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. Configuration.
    let config: DemandConfig = match args.first() {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening config {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {path}"))?
        }
        None => DemandConfig {
            sim_length:  SIM_LENGTH,
            demand_mode: DemandMode::Dynamic,
            seed:        Some(SEED),
            ..DemandConfig::default()
        },
    };
    let step_length_secs = config.step_length_secs;

    // 2. Network.
    let topology = match args.get(1) {
        Some(path) => load_topology_json(Path::new(path))?,
        None => build_intersection(),
    };
    println!(
        "Network: {} edges, {} origins, {} destinations",
        topology.edge_count(),
        topology.origins().len(),
        topology.destination_count()
    );

    // 3. Engine stand-in with the movement routes playback files use.
    let mut conn = RecordingConnector::new();
    for (id, edges) in movement_routes() {
        conn.add_route(&id, &edges)?;
    }

    // 4. Controller and CSV output.
    let mut ctrl = DemandControllerBuilder::new(config, &topology).build(&mut conn)?;
    println!("Strategy: {}", ctrl.strategy());
    let mut obs = DemandOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 5. Run, retiring vehicles once they reach the end of their route.
    let t0 = Instant::now();
    let mut arrived = 0;
    let mut peak = 0;
    while ctrl.tick().0 < ctrl.sim_length() {
        let now_secs = ctrl.tick().as_secs(step_length_secs);
        ctrl.step_observed(&mut conn, &mut obs)?;
        peak = peak.max(conn.vehicle_count()?);
        arrived += retire_arrivals(&mut conn, now_secs)?;
        if let Some(err) = obs.take_error() {
            return Err(err.into());
        }
    }
    obs.on_run_end(ctrl.tick(), ctrl.vehicles_created());
    if let Some(err) = obs.take_error() {
        return Err(err.into());
    }
    info!("run finished in {:.2?}", t0.elapsed());

    // 6. Summary.
    println!("Ticks run:        {}", ctrl.tick().0);
    println!("Final state:      {}", ctrl.state().as_str());
    println!("Vehicles created: {}", ctrl.vehicles_created());
    println!("Arrived:          {arrived}");
    println!("Peak in network:  {peak}");
    println!("Output written to {OUTPUT_DIR}/");
    Ok(())
}

/// Remove every vehicle whose departure plus travel time has passed.
fn retire_arrivals(conn: &mut RecordingConnector, now_secs: f64) -> Result<usize> {
    let done: Vec<VehicleId> = conn
        .vehicles()
        .filter(|v| v.spawn.depart_secs + v.edges.len() as f64 * SECS_PER_EDGE <= now_secs)
        .map(|v| v.spawn.id.clone())
        .collect();
    for id in &done {
        conn.remove_vehicle(id)?;
    }
    Ok(done.len())
}
