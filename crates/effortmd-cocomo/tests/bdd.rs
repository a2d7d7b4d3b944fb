//! BDD-style scenario tests for the COCOMO engine, driven end to end from raw metrics.

use effortmd_aggregate::aggregate;
use effortmd_cocomo::{CocomoError, CostDriverSet, estimate, estimate_kloc};
use effortmd_types::{CostDriver, Mode, ProjectClass, ProjectMetricsSummary, RawFileMetric, Rating};

// ── Helpers ─────────────────────────────────────────────────────

fn one_kloc_project() -> ProjectMetricsSummary {
    let records: Vec<RawFileMetric> = (0..10)
        .map(|i| RawFileMetric::new(format!("src/m{i}.rs"), 100).with_complexity(2))
        .collect();
    aggregate(&records).expect("aggregate")
}

// ── Basic mode ──────────────────────────────────────────────────

mod basic_mode {
    use super::*;

    #[test]
    fn given_ten_files_of_100_loc_when_organic_basic_then_effort_is_2_4() {
        let summary = one_kloc_project();
        assert_eq!(summary.effective_kloc, 1.0);

        let est = estimate(&summary, ProjectClass::Organic, Mode::Basic, None).unwrap();
        assert!((est.effort_pm - 2.4).abs() < 1e-12);
        // 2.5 * 2.4^0.38
        assert!((est.schedule_months - 3.486_745_752_485_474).abs() < 1e-9);
        assert_eq!(est.project_class, ProjectClass::Organic);
        assert_eq!(est.mode, Mode::Basic);
    }

    #[test]
    fn given_same_size_when_embedded_then_effort_is_3_6_and_above_organic() {
        let summary = one_kloc_project();
        let organic = estimate(&summary, ProjectClass::Organic, Mode::Basic, None).unwrap();
        let semi = estimate(&summary, ProjectClass::Semidetached, Mode::Basic, None).unwrap();
        let embedded = estimate(&summary, ProjectClass::Embedded, Mode::Basic, None).unwrap();

        assert!((embedded.effort_pm - 3.6).abs() < 1e-12);
        assert!((semi.effort_pm - 3.0).abs() < 1e-12);
        assert!(organic.effort_pm < semi.effort_pm);
        assert!(semi.effort_pm < embedded.effort_pm);
    }

    #[test]
    fn given_estimate_when_staffing_checked_then_it_is_effort_over_schedule() {
        let est = estimate_kloc(12.5, ProjectClass::Semidetached, Mode::Basic, None).unwrap();
        assert_eq!(est.average_staffing, est.effort_pm / est.schedule_months);
        assert_eq!(est.productivity_kloc_per_pm, 12.5 / est.effort_pm);
    }
}

// ── Failures ────────────────────────────────────────────────────

mod failures {
    use super::*;

    #[test]
    fn given_empty_metrics_when_aggregated_then_pipeline_stops_before_the_engine() {
        assert!(aggregate(&[]).is_err());
    }

    #[test]
    fn given_zero_kloc_when_estimated_then_invalid_size() {
        let err = estimate_kloc(0.0, ProjectClass::Organic, Mode::Basic, None).unwrap_err();
        assert_eq!(err, CocomoError::InvalidSize { kloc: 0.0 });
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn given_summary_of_empty_files_when_estimated_then_invalid_size() {
        let summary = aggregate(&[RawFileMetric::new("blank.rs", 0)]).unwrap();
        let err = estimate(&summary, ProjectClass::Organic, Mode::Intermediate, None).unwrap_err();
        assert!(matches!(err, CocomoError::InvalidSize { .. }));
    }

    #[test]
    fn given_malformed_rating_when_drivers_parsed_then_unknown_driver_rating() {
        let err = CostDriverSet::from_named([("RELY", "ultra")]).unwrap_err();
        assert!(matches!(err, CocomoError::UnknownDriverRating { .. }));
    }
}

// ── Intermediate mode ───────────────────────────────────────────

mod intermediate_mode {
    use super::*;

    #[test]
    fn given_all_nominal_when_intermediate_then_effort_equals_basic() {
        let summary = one_kloc_project();
        for class in ProjectClass::ALL {
            let basic = estimate(&summary, class, Mode::Basic, None).unwrap();
            let inter = estimate(&summary, class, Mode::Intermediate, Some(&CostDriverSet::nominal()))
                .unwrap();
            assert_eq!(inter.eaf, 1.0);
            assert_eq!(inter.effort_pm, basic.effort_pm);
            assert_eq!(inter.schedule_months, basic.schedule_months);
        }
    }

    #[test]
    fn given_one_very_high_driver_when_intermediate_then_effort_exceeds_basic() {
        let summary = one_kloc_project();
        let drivers = CostDriverSet::nominal()
            .with(CostDriver::Rely, Rating::VeryHigh)
            .unwrap();
        let basic = estimate(&summary, ProjectClass::Organic, Mode::Basic, None).unwrap();
        let inter = estimate(&summary, ProjectClass::Organic, Mode::Intermediate, Some(&drivers))
            .unwrap();

        assert!((inter.eaf - 1.40).abs() < 1e-12);
        assert!(inter.effort_pm > basic.effort_pm);
        assert_eq!(inter.nominal_effort_pm, basic.effort_pm);
        assert_eq!(inter.drivers["RELY"].rating, Rating::VeryHigh);
        assert_eq!(inter.drivers["CPLX"].rating, Rating::Nominal);
    }

    #[test]
    fn given_capable_team_when_intermediate_then_schedule_uses_adjusted_effort() {
        let drivers = CostDriverSet::from_named([("ACAP", "very_high"), ("PCAP", "very_high")])
            .unwrap();
        let est = estimate_kloc(10.0, ProjectClass::Organic, Mode::Intermediate, Some(&drivers))
            .unwrap();
        let expected_effort = 2.4 * 10f64.powf(1.05) * 0.71 * 0.70;
        assert!((est.effort_pm - expected_effort).abs() < 1e-9);
        assert!((est.schedule_months - 2.5 * est.effort_pm.powf(0.38)).abs() < 1e-12);
    }
}
