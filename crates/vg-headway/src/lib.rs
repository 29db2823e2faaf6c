//! `vg-headway` — realistic inter-arrival times for a target flow rate.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`johnson`]   | `JohnsonSb`, `JohnsonSu`, `HeadwayDistribution`           |
//! | [`flow_rate`] | `FlowRateSample` — the seven calibrated reference rates   |
//! | [`model`]     | `HeadwayModel`, `HeadwayBin`, `Bracket`                   |
//! | [`error`]     | `HeadwayError`, `HeadwayResult<T>`                        |
//!
//! # Model (summary)
//!
//! Field measurements at seven flow rates (60 … 1700 veh/h) were each fitted
//! with a Johnson SB or SU distribution.  A request between two reference
//! rates draws once from each neighbour and blends the draws linearly; a
//! request outside the table rescales the nearest end's draw by the rate
//! ratio.

pub mod error;
pub mod flow_rate;
pub mod johnson;
pub mod model;

#[cfg(test)]
mod tests;

pub use error::{HeadwayError, HeadwayResult};
pub use flow_rate::FlowRateSample;
pub use johnson::{HeadwayDistribution, JohnsonSb, JohnsonSu};
pub use model::{Bracket, HeadwayBin, HeadwayModel, MAX_HEADWAY_SECS};
