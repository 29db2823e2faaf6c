//! Recorded (playback) demand.
//!
//! # File store layout
//!
//! ```text
//! <root>/
//!   linear/   <level>_<tag>.vg   one file per demand tag
//!   real/     *.vg               any number of recordings
//! ```
//!
//! Each `.vg` file is a JSON object mapping route id to its ordered departure
//! times in seconds (see [`loader`](crate::loader)).

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use vg_core::{DemandMode, DemandRng, RouteId};

use crate::loader::load_playback_json;
use crate::{ScheduleError, ScheduleResult};

/// File extension of recorded demand files.
pub const PLAYBACK_EXTENSION: &str = "vg";

// ── ProfileKind ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// Synthetic linear ramps, one file per demand tag.
    Linear,
    /// Field recordings; one is drawn at random per run.
    Real,
}

impl ProfileKind {
    /// Sub-directory of the store holding this kind's files.
    pub fn dir_name(self) -> &'static str {
        match self {
            ProfileKind::Linear => "linear",
            ProfileKind::Real => "real",
        }
    }

    /// Profile kind and tag for a replay mode; `None` for generated modes.
    pub fn from_demand_mode(mode: &DemandMode) -> Option<(ProfileKind, Option<&str>)> {
        match mode {
            DemandMode::LinearReplay { tag } => Some((ProfileKind::Linear, Some(tag.as_str()))),
            DemandMode::RealReplay => Some((ProfileKind::Real, None)),
            DemandMode::Single | DemandMode::Dynamic => None,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ── PlaybackData ──────────────────────────────────────────────────────────────

/// Recorded departures keyed by route.  Routes iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlaybackData {
    routes: BTreeMap<RouteId, Vec<f64>>,
}

impl PlaybackData {
    /// Wrap a route → departures map, checking that every departure time is
    /// finite, non-negative, and no earlier than its predecessor.
    pub fn new(routes: BTreeMap<RouteId, Vec<f64>>) -> ScheduleResult<Self> {
        for (route, times) in &routes {
            if let Some(&bad) = times.iter().find(|t| !(t.is_finite() && **t >= 0.0)) {
                return Err(ScheduleError::InvalidDepartures {
                    route: route.clone(),
                    reason: format!("departure time {bad} is not a finite non-negative number"),
                });
            }
            if let Some(w) = times.windows(2).find(|w| w[1] < w[0]) {
                return Err(ScheduleError::InvalidDepartures {
                    route: route.clone(),
                    reason: format!("departure {} precedes {}", w[1], w[0]),
                });
            }
        }
        Ok(Self { routes })
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of recorded departures across all routes.
    pub fn vehicle_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn departures(&self, route: &RouteId) -> Option<&[f64]> {
        self.routes.get(route).map(Vec::as_slice)
    }

    /// `(route, departures)` in route order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &[f64])> {
        self.routes.iter().map(|(r, t)| (r, t.as_slice()))
    }

    pub fn into_routes(self) -> BTreeMap<RouteId, Vec<f64>> {
        self.routes
    }
}

// ── PlaybackStore ─────────────────────────────────────────────────────────────

/// A directory of recorded demand files.
#[derive(Debug, Clone)]
pub struct PlaybackStore {
    root: PathBuf,
}

impl PlaybackStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, kind: ProfileKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Every `.vg` file of `kind`, sorted by path.  With a `tag`, only files
    /// whose stem ends in `_<tag>` are kept.  A missing directory has no
    /// candidates.
    pub fn candidates(&self, kind: ProfileKind, tag: Option<&str>) -> ScheduleResult<Vec<PathBuf>> {
        let dir = self.dir(kind);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let suffix = tag.map(|t| format!("_{t}"));
        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PLAYBACK_EXTENSION) {
                continue;
            }
            let stem_matches = match (&suffix, path.file_stem().and_then(|s| s.to_str())) {
                (None, _) => true,
                (Some(suffix), Some(stem)) => stem.ends_with(suffix.as_str()),
                (Some(_), None) => false,
            };
            if stem_matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        debug!("{} {kind} playback candidates in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Pick the file to replay.
    ///
    /// `Linear` requires exactly one candidate; `Real` draws uniformly from
    /// all of them.  A linear tag matching several files is an error, not a
    /// random pick: the tag must identify a single recording so evaluation
    /// runs replay the same demand.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::NoCandidates`] when nothing matches;
    /// [`ScheduleError::Ambiguous`] when a linear tag matches several files.
    pub fn select(
        &self,
        kind: ProfileKind,
        tag: Option<&str>,
        rng: &mut DemandRng,
    ) -> ScheduleResult<PathBuf> {
        let candidates = self.candidates(kind, tag)?;
        let pattern = match tag {
            Some(t) => format!("*_{t}.{PLAYBACK_EXTENSION}"),
            None => format!("*.{PLAYBACK_EXTENSION}"),
        };
        if candidates.is_empty() {
            return Err(ScheduleError::NoCandidates { dir: self.dir(kind), pattern });
        }
        match kind {
            ProfileKind::Linear if candidates.len() > 1 => Err(ScheduleError::Ambiguous {
                dir: self.dir(kind),
                pattern,
                count: candidates.len(),
            }),
            ProfileKind::Linear => Ok(candidates[0].clone()),
            ProfileKind::Real => rng
                .choose(&candidates)
                .cloned()
                .ok_or(ScheduleError::NoCandidates { dir: self.dir(kind), pattern }),
        }
    }

    /// Select and load the recording for `kind`/`tag`.
    pub fn load_playback_schedule(
        &self,
        kind: ProfileKind,
        tag: Option<&str>,
        rng: &mut DemandRng,
    ) -> ScheduleResult<PlaybackData> {
        let path = self.select(kind, tag, rng)?;
        let data = load_playback_json(&path)?;
        info!(
            "playback file {}: {} routes, {} vehicles",
            path.display(),
            data.route_count(),
            data.vehicle_count()
        );
        Ok(data)
    }
}
