//! record_playback: turn a flow-rate profile into a `.vg` playback file.
//!
//! ```text
//! record_playback [out_dir] [tag] [flows.csv]
//! ```
//!
//! `flows.csv` has the columns `route_id,tick,flow_vph` with 1 s ticks.
//! Without it a one-hour ramp over the twelve intersection movements is
//! used.  The result lands in `<out_dir>/linear/ramp_<tag>.vg`, where the
//! `linear_<tag>` demand mode finds it.

mod network;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use env_logger::{Builder, Env};

use vg_core::{DemandRng, RouteId};
use vg_headway::HeadwayModel;
use vg_schedule::{
    load_flow_profile_csv, record_playback, write_playback, FlowProfile, ProfileKind,
    PLAYBACK_EXTENSION,
};

use network::{is_through, ARMS};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64   = 42;
const HORIZON_SECS:   usize = 3_600;
const RAMP_START_VPH: f64   = 100.0;
const RAMP_END_VPH:   f64   = 900.0;
const TURN_SHARE:     f64   = 0.25; // turning flow relative to through flow

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let out_dir = PathBuf::from(args.first().map_or("playback", String::as_str));
    let tag = args.get(1).map_or("01", String::as_str);

    // 1. Flow profile.
    let profile = match args.get(2) {
        Some(path) => load_flow_profile_csv(Path::new(path))?,
        None => ramp_profile(),
    };
    println!("Profile: {} routes over {} s", profile.route_count(), profile.horizon());

    // 2. Sample departures.
    let mut rng = DemandRng::seeded(SEED);
    let data = record_playback(&profile, &HeadwayModel::calibrated(), &mut rng)?;

    // 3. Write into the store layout.
    let dir = out_dir.join(ProfileKind::Linear.dir_name());
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("ramp_{tag}.{PLAYBACK_EXTENSION}"));
    write_playback(&path, &data)?;

    println!("Recorded {} departures on {} routes", data.vehicle_count(), data.route_count());
    println!("Written to {}", path.display());
    Ok(())
}

/// Through movements ramp linearly from `RAMP_START_VPH` to `RAMP_END_VPH`;
/// turns carry `TURN_SHARE` of that.
fn ramp_profile() -> FlowProfile {
    let mut profile = FlowProfile::new();
    let step = (RAMP_END_VPH - RAMP_START_VPH) / HORIZON_SECS as f64;
    for from in ARMS {
        for to in ARMS.iter().filter(|&&t| t != from) {
            let share = if is_through(from, to) { 1.0 } else { TURN_SHARE };
            let flows = (0..HORIZON_SECS)
                .map(|t| (RAMP_START_VPH + step * t as f64) * share)
                .collect();
            profile.insert(RouteId::new(format!("r_{from}_{to}")), flows);
        }
    }
    profile
}
