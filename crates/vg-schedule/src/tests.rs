//! Unit tests for vg-schedule.

use vg_core::EdgeId;

fn origins() -> Vec<EdgeId> {
    ["n_in", "e_in", "s_in", "w_in"].into_iter().map(EdgeId::from).collect()
}

// ── Target curve & arrival counts ─────────────────────────────────────────────

#[cfg(test)]
mod curve {
    use vg_core::DemandRng;

    use crate::{arrival_counts, target_curve, ScheduleError, CURVE_OFFSET};

    #[test]
    fn half_sine_dips_mid_horizon() {
        let curve = target_curve(101);
        assert_eq!(curve.len(), 101);
        assert!((curve[0] - CURVE_OFFSET).abs() < 1e-9);
        assert!((curve[100] - CURVE_OFFSET).abs() < 1e-9);
        assert!((curve[50] - 0.55).abs() < 1e-9);
        assert!(curve.iter().all(|&c| c >= 0.55 - 1e-9 && c <= CURVE_OFFSET + 1e-9));
    }

    #[test]
    fn degenerate_lengths() {
        assert!(target_curve(0).is_empty());
        let one = target_curve(1);
        assert_eq!(one.len(), 1);
        assert!((one[0] - CURVE_OFFSET).abs() < 1e-9);
    }

    #[test]
    fn counts_follow_mean_headway() {
        // Mean headway 0.5 s → 2 arrivals per tick on average.
        let curve = vec![0.5; 10_000];
        let counts = arrival_counts(&curve, &mut DemandRng::seeded(21)).unwrap();
        let mean = counts.iter().map(|&c| f64::from(c)).sum::<f64>() / counts.len() as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean {mean}");
    }

    #[test]
    fn non_positive_curve_rejected() {
        let result = arrival_counts(&[1.0, 0.0], &mut DemandRng::seeded(0));
        assert!(matches!(result, Err(ScheduleError::InvalidCurve(v)) if v == 0.0));
    }
}

// ── Dynamic schedule ──────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamic {
    use vg_core::{DemandRng, RunMode};

    use super::origins;
    use crate::{
        arrival_counts, build_dynamic_schedule, target_curve, DynamicScheduleBuilder,
        ScheduleError, ShiftPolicy, TAIL_ZERO_TICKS,
    };

    #[test]
    fn one_entry_per_tick() {
        let s = DynamicScheduleBuilder::new(900).build(&origins(), &mut DemandRng::seeded(1)).unwrap();
        assert_eq!(s.len(), 900);
        assert_eq!(s.base_counts().len(), 900);
        assert!(s.remaining_vehicles() > 0);
    }

    #[test]
    fn tail_always_zero() {
        for (seed, shift) in [(1, ShiftPolicy::None), (2, ShiftPolicy::Random), (3, ShiftPolicy::Fixed(1234))] {
            for scale in [0.0, 1.0, 3.0] {
                let s = DynamicScheduleBuilder::new(3600)
                    .scale(scale)
                    .shift(shift)
                    .build(&origins(), &mut DemandRng::seeded(seed))
                    .unwrap();
                let tail = 3600 - TAIL_ZERO_TICKS;
                assert!(s.base_counts()[tail..].iter().all(|&c| c == 0));
                assert!(s.entries()[tail..].iter().all(Vec::is_empty));
            }
        }
    }

    #[test]
    fn horizon_shorter_than_tail_is_empty() {
        let s = DynamicScheduleBuilder::new(30).build(&origins(), &mut DemandRng::seeded(4)).unwrap();
        assert_eq!(s.len(), 30);
        assert_eq!(s.remaining_vehicles(), 0);
    }

    #[test]
    fn zero_scale_is_all_empty() {
        let s = DynamicScheduleBuilder::new(600)
            .scale(0.0)
            .build(&origins(), &mut DemandRng::seeded(5))
            .unwrap();
        assert!(s.entries().iter().all(Vec::is_empty));
        // Counts are still drawn; only the expansion is scaled away.
        assert!(s.base_counts().iter().any(|&c| c > 0));
    }

    #[test]
    fn scale_multiplies_counts() {
        let s = DynamicScheduleBuilder::new(600)
            .scale(2.0)
            .build(&origins(), &mut DemandRng::seeded(6))
            .unwrap();
        for (entry, &count) in s.entries().iter().zip(s.base_counts()) {
            assert_eq!(entry.len(), 2 * count as usize);
        }
        let half = DynamicScheduleBuilder::new(600)
            .scale(0.5)
            .build(&origins(), &mut DemandRng::seeded(6))
            .unwrap();
        for (entry, &count) in half.entries().iter().zip(half.base_counts()) {
            assert_eq!(entry.len(), count as usize / 2);
        }
    }

    #[test]
    fn spawns_only_on_origins() {
        let all = origins();
        let s = DynamicScheduleBuilder::new(600).build(&all, &mut DemandRng::seeded(7)).unwrap();
        assert!(s.entries().iter().flatten().all(|e| all.contains(e)));
    }

    #[test]
    fn test_mode_keeps_phase() {
        // Peak demand sits mid-horizon in every evaluation run.
        let n = 3600;
        for seed in 0..5 {
            let s = build_dynamic_schedule(n, 1.0, RunMode::Test, &origins(), &mut DemandRng::seeded(seed))
                .unwrap();
            assert_eq!(s.shift(), 0);
            let window = |from: usize| s.base_counts()[from..from + 300].iter().sum::<u32>();
            assert!(window(1650) > window(0), "seed {seed}");
            assert!(window(1650) > window(n - 360), "seed {seed}");
        }
    }

    #[test]
    fn train_mode_shifts_randomly() {
        let shifts: Vec<usize> = (0..10)
            .map(|seed| {
                build_dynamic_schedule(3600, 1.0, RunMode::Train, &origins(), &mut DemandRng::seeded(seed))
                    .unwrap()
                    .shift()
            })
            .collect();
        assert!(shifts.iter().all(|&s| s < 3600));
        assert!(shifts.iter().any(|&s| s != shifts[0]));
    }

    #[test]
    fn fixed_shift_rotates_counts() {
        let n = 1000;
        let k = 250;
        let raw = arrival_counts(&target_curve(n), &mut DemandRng::seeded(9)).unwrap();
        let s = DynamicScheduleBuilder::new(n)
            .shift(ShiftPolicy::Fixed(k))
            .build(&origins(), &mut DemandRng::seeded(9))
            .unwrap();
        assert_eq!(s.shift(), k);
        for i in 0..n - TAIL_ZERO_TICKS {
            assert_eq!(s.base_counts()[i], raw[(i + k) % n], "tick {i}");
        }
    }

    #[test]
    fn precondition_errors() {
        let mut rng = DemandRng::seeded(0);
        assert!(matches!(
            DynamicScheduleBuilder::new(0).build(&origins(), &mut rng),
            Err(ScheduleError::ZeroHorizon)
        ));
        assert!(matches!(
            DynamicScheduleBuilder::new(100).scale(-1.0).build(&origins(), &mut rng),
            Err(ScheduleError::InvalidScale(_))
        ));
        assert!(matches!(
            DynamicScheduleBuilder::new(600).build(&[], &mut rng),
            Err(ScheduleError::NoOrigins)
        ));
        // Nothing to place, so no origins are needed.
        assert!(DynamicScheduleBuilder::new(600).scale(0.0).build(&[], &mut rng).is_ok());
    }

    #[test]
    fn pull_consumes_then_exhausts() {
        let mut s = DynamicScheduleBuilder::new(120).build(&origins(), &mut DemandRng::seeded(3)).unwrap();
        let total = s.remaining_vehicles();
        let mut pulled = 0;
        for _ in 0..120 {
            pulled += s.pull().unwrap().len();
        }
        assert_eq!(pulled, total);
        assert!(s.is_exhausted());
        assert_eq!(s.remaining_ticks(), 0);
        for _ in 0..10 {
            assert!(s.pull().is_none());
        }
    }
}

// ── Playback store ────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use std::fs;
    use std::path::Path;

    use vg_core::{DemandMode, DemandRng, RouteId};

    use crate::{PlaybackStore, ProfileKind, ScheduleError};

    fn write(dir: &Path, name: &str, body: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    fn seeded_store() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let linear = root.path().join("linear");
        write(&linear, "lvl1_03.vg", r#"{"r_ns": [1.0, 2.5], "r_ew": [0.5]}"#);
        write(&linear, "lvl1_05.vg", r#"{"r_ns": [4.0]}"#);
        write(&linear, "lvl1_03.txt", "not playback");
        let real = root.path().join("real");
        write(&real, "mon.vg", r#"{"r_ns": [1.0]}"#);
        write(&real, "tue.vg", r#"{"r_ns": [2.0]}"#);
        write(&real, "wed.vg", r#"{"r_ns": [3.0]}"#);
        root
    }

    #[test]
    fn linear_tag_selects_single_file() {
        let root = seeded_store();
        let store = PlaybackStore::new(root.path());
        let path = store.select(ProfileKind::Linear, Some("03"), &mut DemandRng::seeded(0)).unwrap();
        assert_eq!(path.file_name().unwrap(), "lvl1_03.vg");

        let data = store
            .load_playback_schedule(ProfileKind::Linear, Some("03"), &mut DemandRng::seeded(0))
            .unwrap();
        assert_eq!(data.route_count(), 2);
        assert_eq!(data.vehicle_count(), 3);
        assert_eq!(data.departures(&RouteId::from("r_ns")), Some(&[1.0, 2.5][..]));
    }

    #[test]
    fn tag_needs_underscore_boundary() {
        let root = seeded_store();
        let store = PlaybackStore::new(root.path());
        assert!(store.candidates(ProfileKind::Linear, Some("3")).unwrap().is_empty());
    }

    #[test]
    fn missing_linear_tag_is_fatal() {
        let root = seeded_store();
        let store = PlaybackStore::new(root.path());
        match store.select(ProfileKind::Linear, Some("07"), &mut DemandRng::seeded(0)) {
            Err(ScheduleError::NoCandidates { pattern, .. }) => assert_eq!(pattern, "*_07.vg"),
            other => panic!("expected NoCandidates, got {other:?}"),
        }
    }

    #[test]
    fn ambiguous_linear_tag_is_fatal() {
        let root = seeded_store();
        write(&root.path().join("linear"), "lvl2_03.vg", "{}");
        let store = PlaybackStore::new(root.path());
        assert!(matches!(
            store.select(ProfileKind::Linear, Some("03"), &mut DemandRng::seeded(0)),
            Err(ScheduleError::Ambiguous { count: 2, .. })
        ));
    }

    #[test]
    fn real_draws_from_every_recording() {
        let root = seeded_store();
        let store = PlaybackStore::new(root.path());
        let mut rng = DemandRng::seeded(12);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..100 {
            let path = store.select(ProfileKind::Real, None, &mut rng).unwrap();
            seen.insert(path.file_name().unwrap().to_string_lossy().into_owned());
        }
        let names: Vec<&str> = seen.iter().map(String::as_str).collect();
        assert_eq!(names, ["mon.vg", "tue.vg", "wed.vg"]);
    }

    #[test]
    fn missing_directory_has_no_candidates() {
        let root = tempfile::tempdir().unwrap();
        let store = PlaybackStore::new(root.path());
        assert!(matches!(
            store.select(ProfileKind::Real, None, &mut DemandRng::seeded(0)),
            Err(ScheduleError::NoCandidates { .. })
        ));
    }

    #[test]
    fn kind_from_demand_mode() {
        let linear = DemandMode::LinearReplay { tag: "05".into() };
        assert_eq!(ProfileKind::from_demand_mode(&linear), Some((ProfileKind::Linear, Some("05"))));
        assert_eq!(ProfileKind::from_demand_mode(&DemandMode::RealReplay), Some((ProfileKind::Real, None)));
        assert_eq!(ProfileKind::from_demand_mode(&DemandMode::Dynamic), None);
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use vg_core::RouteId;

    use crate::{
        load_flow_profile_reader, load_playback_json, load_playback_reader, write_playback,
        ScheduleError,
    };

    #[test]
    fn routes_iterate_sorted() {
        let data = load_playback_reader(Cursor::new(r#"{"r_b": [1.0], "r_a": [0.0, 0.0, 7.5]}"#)).unwrap();
        let routes: Vec<&str> = data.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(routes, ["r_a", "r_b"]);
        assert_eq!(data.vehicle_count(), 4);
    }

    #[test]
    fn decreasing_departures_rejected() {
        let result = load_playback_reader(Cursor::new(r#"{"r_a": [5.0, 2.0]}"#));
        match result {
            Err(ScheduleError::InvalidDepartures { route, .. }) => assert_eq!(route, RouteId::from("r_a")),
            other => panic!("expected InvalidDepartures, got {other:?}"),
        }
    }

    #[test]
    fn negative_departure_rejected() {
        assert!(matches!(
            load_playback_reader(Cursor::new(r#"{"r_a": [-1.0]}"#)),
            Err(ScheduleError::InvalidDepartures { .. })
        ));
    }

    #[test]
    fn malformed_playback_is_parse_error() {
        assert!(matches!(
            load_playback_reader(Cursor::new(r#"{"r_a": "soon"}"#)),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lvl1_03.vg");
        let data = load_playback_reader(Cursor::new(r#"{"r_a": [0.5, 3.25], "r_b": []}"#)).unwrap();
        write_playback(&path, &data).unwrap();
        assert_eq!(load_playback_json(&path).unwrap(), data);
    }

    #[test]
    fn flow_profile_pads_missing_ticks() {
        let csv = "route_id,tick,flow_vph\nr_a,0,300\nr_a,3,500\nr_b,1,80\n";
        let profile = load_flow_profile_reader(Cursor::new(csv)).unwrap();
        assert_eq!(profile.route_count(), 2);
        assert_eq!(profile.flows(&"r_a".into()), Some(&[300.0, 0.0, 0.0, 500.0][..]));
        assert_eq!(profile.flows(&"r_b".into()), Some(&[0.0, 80.0][..]));
        assert_eq!(profile.horizon(), 4);
    }

    #[test]
    fn negative_flow_rejected() {
        let csv = "route_id,tick,flow_vph\nr_a,0,-5\n";
        assert!(matches!(load_flow_profile_reader(Cursor::new(csv)), Err(ScheduleError::Parse(_))));
    }
}

// ── Recorder ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod recorder {
    use vg_core::{DemandRng, RouteId};
    use vg_headway::HeadwayModel;

    use crate::{record_playback, FlowProfile};

    #[test]
    fn low_flow_ticks_produce_nothing() {
        let mut profile = FlowProfile::new();
        profile.insert(RouteId::from("r_quiet"), vec![0.0; 600]);
        profile.insert(RouteId::from("r_sub"), vec![59.0; 600]);
        let data = record_playback(&profile, &HeadwayModel::calibrated(), &mut DemandRng::seeded(1)).unwrap();
        assert_eq!(data.route_count(), 2);
        assert_eq!(data.vehicle_count(), 0);
    }

    #[test]
    fn departures_ordered_and_after_activation() {
        let mut flows = vec![0.0; 100];
        flows.extend(std::iter::repeat(500.0).take(1_000));
        let mut profile = FlowProfile::new();
        profile.insert(RouteId::from("r_a"), flows);

        let data = record_playback(&profile, &HeadwayModel::calibrated(), &mut DemandRng::seeded(2)).unwrap();
        let times = data.departures(&"r_a".into()).unwrap();
        assert!(!times.is_empty());
        assert!(times[0] >= 100.0);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn chain_restarts_after_low_flow_gap() {
        let mut flows = vec![1_700.0; 5];
        flows.extend(std::iter::repeat(0.0).take(295));
        flows.extend(std::iter::repeat(1_700.0).take(5));
        let mut profile = FlowProfile::new();
        profile.insert(RouteId::from("r_burst"), flows);

        let data = record_playback(&profile, &HeadwayModel::calibrated(), &mut DemandRng::seeded(4)).unwrap();
        let times = data.departures(&"r_burst".into()).unwrap();
        let (early, late): (Vec<f64>, Vec<f64>) = times.iter().partition(|&&t| t < 150.0);
        assert!(!early.is_empty());
        assert!(!late.is_empty());
        assert!(late.iter().all(|&t| t >= 300.0), "{late:?}");
    }

    #[test]
    fn heavier_flow_records_more_vehicles() {
        let mut profile = FlowProfile::new();
        profile.insert(RouteId::from("r_light"), vec![200.0; 3_600]);
        profile.insert(RouteId::from("r_heavy"), vec![1_400.0; 3_600]);
        let data = record_playback(&profile, &HeadwayModel::calibrated(), &mut DemandRng::seeded(3)).unwrap();
        let light = data.departures(&"r_light".into()).unwrap().len();
        let heavy = data.departures(&"r_heavy".into()).unwrap().len();
        assert!(heavy > light, "heavy {heavy} vs light {light}");
    }
}
