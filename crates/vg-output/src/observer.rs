//! `DemandOutputObserver<W>` — bridges `DemandObserver` to an `OutputWriter`.

use log::warn;

use vg_core::Tick;
use vg_demand::{ControllerState, DemandObserver, SpawnEvent};

use crate::row::{SpawnRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DemandObserver`] that writes spawn events and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Spawns are buffered for the current tick and written with its summary.
/// Observer hooks cannot fail, so the first write error is stored; check it
/// with [`take_error`][Self::take_error] after the run.
pub struct DemandOutputObserver<W: OutputWriter> {
    writer:           W,
    pending:          Vec<SpawnRow>,
    vehicles_created: u64,
    last_error:       Option<OutputError>,
}

impl<W: OutputWriter> DemandOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending:          Vec::new(),
            vehicles_created: 0,
            last_error:       None,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DemandObserver for DemandOutputObserver<W> {
    fn on_spawn(&mut self, event: &SpawnEvent<'_>) {
        let (destination, route_len) = match event.path {
            Some(path) => (path.destination().map(|e| e.to_string()).unwrap_or_default(), path.len()),
            None => (String::new(), 0),
        };
        self.pending.push(SpawnRow {
            tick:        event.tick.0,
            vehicle_id:  event.vehicle.to_string(),
            source:      event.source.as_str(),
            route_id:    event.route.to_string(),
            depart_secs: event.depart_secs,
            destination,
            route_len,
        });
    }

    fn on_tick_end(&mut self, tick: Tick, spawned: usize, state: ControllerState) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_spawns(&rows);
            self.store_err(result);
        }
        self.vehicles_created += spawned as u64;
        let row = TickSummaryRow {
            tick:             tick.0,
            spawned:          spawned as u64,
            vehicles_created: self.vehicles_created,
            state:            state.as_str(),
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, final_tick: Tick, vehicles_created: u64) {
        if vehicles_created != self.vehicles_created {
            warn!(
                "controller reports {vehicles_created} vehicles at {final_tick}, output saw {}",
                self.vehicles_created
            );
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
