//! `vg-schedule` — when and where vehicles appear.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`dynamic`]  | `DemandSchedule`, `DynamicScheduleBuilder`, `ShiftPolicy`, `target_curve` |
//! | [`playback`] | `PlaybackData`, `PlaybackStore`, `ProfileKind`             |
//! | [`recorder`] | `FlowProfile`, `record_playback`                           |
//! | [`loader`]   | playback JSON read/write, flow-profile CSV                 |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! Dynamic schedules are computed once for the whole horizon and consumed
//! tick by tick with [`DemandSchedule::pull`].  Playback data is loaded once
//! and replayed in a single burst by the demand controller.

pub mod dynamic;
pub mod error;
pub mod loader;
pub mod playback;
pub mod recorder;

#[cfg(test)]
mod tests;

pub use dynamic::{
    arrival_counts, build_dynamic_schedule, target_curve, DemandSchedule, DynamicScheduleBuilder,
    ShiftPolicy, CURVE_OFFSET, TAIL_ZERO_TICKS,
};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{
    load_flow_profile_csv, load_flow_profile_reader, load_playback_json, load_playback_reader,
    write_playback, write_playback_writer,
};
pub use playback::{PlaybackData, PlaybackStore, ProfileKind, PLAYBACK_EXTENSION};
pub use recorder::{record_playback, FlowProfile};
