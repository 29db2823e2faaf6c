//! `vg-output` — demand-run output writers.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `spawn_events.csv`, `tick_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`DemandOutputObserver`], which implements `vg_demand::DemandObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vg_output::{CsvWriter, DemandOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = DemandOutputObserver::new(writer);
//! controller.run(&mut conn, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     log::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::DemandOutputObserver;
pub use row::{SpawnRow, TickSummaryRow};
pub use writer::OutputWriter;
