//! Plain data row types written by output backends.

/// One inserted vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRow {
    pub tick:        u64,
    pub vehicle_id:  String,
    /// `random_walk` or `playback`.
    pub source:      &'static str,
    /// Engine route the vehicle was inserted on.
    pub route_id:    String,
    pub depart_secs: f64,
    /// Final edge of the walked path; empty for playback vehicles.
    pub destination: String,
    /// Edges in the walked path; 0 for playback vehicles.
    pub route_len:   usize,
}

/// Summary of one controller step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub spawned:          u64,
    /// Running total at the end of the tick.
    pub vehicles_created: u64,
    /// Controller state after the step.
    pub state:            &'static str,
}
