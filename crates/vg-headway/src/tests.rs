//! Unit tests for vg-headway.

#[cfg(test)]
mod distributions {
    use rand_distr::Distribution;
    use vg_core::DemandRng;

    use crate::{HeadwayError, JohnsonSb, JohnsonSu};

    #[test]
    fn sb_stays_inside_support() {
        let d = JohnsonSb::new(0.9, 0.71, 0.85, 60.0).unwrap();
        let (lo, hi) = d.support();
        let mut rng = DemandRng::seeded(1);
        for _ in 0..10_000 {
            let x = d.sample(rng.inner());
            assert!(x >= lo && x <= hi, "{x} outside ({lo}, {hi})");
        }
    }

    #[test]
    fn su_empirical_median_matches() {
        let d = JohnsonSu::new(-2.18, 1.15, 0.8, 0.52).unwrap();
        let mut rng = DemandRng::seeded(2);
        let mut xs: Vec<f64> = (0..10_000).map(|_| d.sample(rng.inner())).collect();
        xs.sort_by(f64::total_cmp);
        let empirical = xs[xs.len() / 2];
        assert!((empirical - d.median()).abs() < 0.1, "{empirical} vs {}", d.median());
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(matches!(JohnsonSb::new(0.0, 0.0, 0.0, 1.0), Err(HeadwayError::InvalidParameters(_))));
        assert!(matches!(JohnsonSu::new(0.0, 1.0, 0.0, -1.0), Err(HeadwayError::InvalidParameters(_))));
    }
}

#[cfg(test)]
mod table {
    use crate::{FlowRateSample, HeadwayBin, HeadwayError, HeadwayModel};

    #[test]
    fn calibrated_rates_ascending() {
        let model = HeadwayModel::calibrated();
        let rates: Vec<f64> = model.bins().iter().map(|b| b.rate_vph).collect();
        assert_eq!(rates, [60.0, 200.0, 500.0, 800.0, 1100.0, 1400.0, 1700.0]);
        assert_eq!(model.min_rate(), 30.0);
    }

    #[test]
    fn custom_table_validation() {
        let bin = |r: f64| HeadwayBin { rate_vph: r, distribution: FlowRateSample::Vph60.distribution() };
        assert!(matches!(HeadwayModel::new(vec![]), Err(HeadwayError::Table(_))));
        assert!(HeadwayModel::new(vec![bin(100.0), bin(100.0)]).is_err());
        assert!(HeadwayModel::new(vec![bin(-5.0)]).is_err());
        assert!(HeadwayModel::new(vec![bin(100.0), bin(400.0)]).is_ok());
    }
}

#[cfg(test)]
mod bracket {
    use crate::{Bracket, HeadwayError, HeadwayModel};

    #[test]
    fn reference_rates_collapse_to_one_bin() {
        let model = HeadwayModel::calibrated();
        assert_eq!(model.bracket(60.0).unwrap(), Bracket::Below { factor: 1.0 });
        for (i, bin) in model.bins().iter().enumerate().skip(1) {
            match model.bracket(bin.rate_vph).unwrap() {
                Bracket::Between { upper, ratio, .. } => {
                    assert_eq!(upper, i);
                    assert_eq!(ratio, 1.0);
                }
                other => panic!("rate {} gave {other:?}", bin.rate_vph),
            }
        }
    }

    #[test]
    fn midpoint_interpolates_halfway() {
        let model = HeadwayModel::calibrated();
        assert_eq!(
            model.bracket(350.0).unwrap(),
            Bracket::Between { lower: 1, upper: 2, ratio: 0.5 }
        );
    }

    #[test]
    fn outside_table_rescales() {
        let model = HeadwayModel::calibrated();
        assert_eq!(model.bracket(30.0).unwrap(), Bracket::Below { factor: 2.0 });
        assert_eq!(model.bracket(3400.0).unwrap(), Bracket::Above { factor: 0.5 });
    }

    #[test]
    fn below_floor_is_error() {
        let model = HeadwayModel::calibrated();
        assert!(matches!(model.bracket(29.9), Err(HeadwayError::BelowFloor { .. })));
    }

    #[test]
    fn non_positive_rates_are_invalid() {
        let model = HeadwayModel::calibrated();
        for r in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(model.bracket(r), Err(HeadwayError::InvalidRate(_))), "{r}");
        }
    }
}

#[cfg(test)]
mod sampling {
    use rand_distr::Distribution;
    use vg_core::DemandRng;

    use crate::{FlowRateSample, HeadwayModel, MAX_HEADWAY_SECS};

    #[test]
    fn non_negative_across_table() {
        let model = HeadwayModel::calibrated();
        let mut rng = DemandRng::seeded(11);
        let mut rate = 60.0;
        while rate <= 1700.0 {
            for _ in 0..200 {
                let h = model.sample_headway(rate, &mut rng).unwrap();
                assert!(h >= 0.0, "rate {rate} gave {h}");
            }
            rate += 25.0;
        }
    }

    #[test]
    fn exact_reference_rate_equals_upper_draw() {
        // At 800 v/h the ratio is 1: the blended value is the 800 v/h draw,
        // taken after the (discarded) 500 v/h draw.
        let model = HeadwayModel::calibrated();
        let mut a = DemandRng::seeded(5);
        let mut b = DemandRng::seeded(5);
        for _ in 0..100 {
            let h = model.sample_headway(800.0, &mut a).unwrap();
            let _lo = FlowRateSample::Vph500.distribution().sample(b.inner());
            let hi = FlowRateSample::Vph800.distribution().sample(b.inner());
            assert_eq!(h, hi.max(0.0));
        }
    }

    #[test]
    fn midpoint_blends_both_draws() {
        let model = HeadwayModel::calibrated();
        let mut a = DemandRng::seeded(8);
        let mut b = DemandRng::seeded(8);
        for _ in 0..100 {
            let h = model.sample_headway(650.0, &mut a).unwrap();
            let lo = FlowRateSample::Vph500.distribution().sample(b.inner());
            let hi = FlowRateSample::Vph800.distribution().sample(b.inner());
            assert!((h - (0.5 * lo + 0.5 * hi).max(0.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn low_flow_is_rescaled_and_capped() {
        let model = HeadwayModel::calibrated();
        let mut rng = DemandRng::seeded(3);
        for _ in 0..1_000 {
            let h = model.sample_headway(30.0, &mut rng).unwrap();
            // Lowest bin support is (0.85, 130.85); doubled, then capped.
            assert!(h > 1.7 && h <= MAX_HEADWAY_SECS, "{h}");
        }
    }

    #[test]
    fn saturated_flow_shrinks_headways() {
        let model = HeadwayModel::calibrated();
        let mut rng = DemandRng::seeded(4);
        let mean = |rate: f64, rng: &mut DemandRng| -> f64 {
            (0..5_000).map(|_| model.sample_headway(rate, rng).unwrap()).sum::<f64>() / 5_000.0
        };
        let at_cap = mean(1700.0, &mut rng);
        let beyond = mean(3400.0, &mut rng);
        assert!(beyond < at_cap, "{beyond} should be below {at_cap}");
        assert!(beyond >= 0.0);
    }

    #[test]
    fn below_floor_propagates() {
        let model = HeadwayModel::calibrated();
        assert!(model.sample_headway(10.0, &mut DemandRng::seeded(0)).is_err());
    }
}
