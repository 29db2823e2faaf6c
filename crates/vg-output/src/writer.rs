//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, SpawnRow, TickSummaryRow};

/// A sink for spawn events and tick summaries.
///
/// Errors surface to the observer, which stores them for
/// [`DemandOutputObserver::take_error`](crate::DemandOutputObserver::take_error).
pub trait OutputWriter {
    /// Write the vehicles spawned during one tick.
    fn write_spawns(&mut self, rows: &[SpawnRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
