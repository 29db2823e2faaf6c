//! Playback (JSON) and flow-profile (CSV) loaders.
//!
//! # Playback format
//!
//! ```json
//! { "r_north_south": [3.2, 9.8, 15.1], "r_east_west": [0.9, 41.0] }
//! ```
//!
//! Departure times are seconds from the start of the run and must be
//! non-decreasing per route.
//!
//! # Flow-profile format
//!
//! One row per route and tick; ticks absent for a route have zero flow.
//!
//! ```csv
//! route_id,tick,flow_vph
//! r_north_south,0,300
//! r_north_south,1,320
//! r_east_west,0,80
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;

use vg_core::RouteId;

use crate::recorder::FlowProfile;
use crate::{PlaybackData, ScheduleError, ScheduleResult};

// ── Playback ──────────────────────────────────────────────────────────────────

pub fn load_playback_json(path: &Path) -> ScheduleResult<PlaybackData> {
    let file = std::fs::File::open(path)?;
    load_playback_reader(BufReader::new(file))
}

/// Like [`load_playback_json`] but accepts any `Read` source.
pub fn load_playback_reader<R: Read>(reader: R) -> ScheduleResult<PlaybackData> {
    let routes: BTreeMap<RouteId, Vec<f64>> =
        serde_json::from_reader(reader).map_err(|e| ScheduleError::Parse(e.to_string()))?;
    PlaybackData::new(routes)
}

/// Write `data` as a playback file, creating or truncating `path`.
pub fn write_playback(path: &Path, data: &PlaybackData) -> ScheduleResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_playback_writer(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

pub fn write_playback_writer<W: Write>(writer: W, data: &PlaybackData) -> ScheduleResult<()> {
    serde_json::to_writer_pretty(writer, data).map_err(|e| ScheduleError::Parse(e.to_string()))
}

// ── Flow profile ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FlowRecord {
    route_id: String,
    tick:     u32,
    flow_vph: f64,
}

pub fn load_flow_profile_csv(path: &Path) -> ScheduleResult<FlowProfile> {
    let file = std::fs::File::open(path)?;
    load_flow_profile_reader(file)
}

/// Like [`load_flow_profile_csv`] but accepts any `Read` source.
pub fn load_flow_profile_reader<R: Read>(reader: R) -> ScheduleResult<FlowProfile> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut profile = FlowProfile::default();

    for result in csv_reader.deserialize::<FlowRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if !(row.flow_vph.is_finite() && row.flow_vph >= 0.0) {
            return Err(ScheduleError::Parse(format!(
                "route {} tick {}: flow {} is not a finite non-negative rate",
                row.route_id, row.tick, row.flow_vph
            )));
        }
        profile.set(RouteId::from(row.route_id), row.tick as usize, row.flow_vph);
    }
    Ok(profile)
}
