//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `spawn_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, SpawnRow, TickSummaryRow};

/// Writes demand output to two CSV files.
pub struct CsvWriter {
    spawns:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the output directory if needed, open (or truncate) both files,
    /// and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut spawns = Writer::from_path(dir.join("spawn_events.csv"))?;
        spawns.write_record([
            "tick", "vehicle_id", "source", "route_id", "depart_secs", "destination", "route_len",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "spawned", "vehicles_created", "state"])?;

        Ok(Self { spawns, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_spawns(&mut self, rows: &[SpawnRow]) -> OutputResult<()> {
        for row in rows {
            self.spawns.write_record(&[
                row.tick.to_string(),
                row.vehicle_id.clone(),
                row.source.to_owned(),
                row.route_id.clone(),
                format!("{:.3}", row.depart_secs),
                row.destination.clone(),
                row.route_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.spawned.to_string(),
            row.vehicles_created.to_string(),
            row.state.to_owned(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.spawns.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
