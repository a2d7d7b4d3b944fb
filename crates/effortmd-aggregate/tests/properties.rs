use effortmd_aggregate::aggregate;
use effortmd_types::RawFileMetric;
use proptest::prelude::*;

fn arb_records() -> impl Strategy<Value = Vec<RawFileMetric>> {
    prop::collection::vec(
        (0u64..100_000, proptest::option::of(0u32..60)),
        1..64,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (loc, cc))| {
                let mut m = RawFileMetric::new(format!("src/file_{i}.rs"), loc);
                m.cyclomatic_complexity = cc;
                m
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn total_loc_is_exact_sum(records in arb_records()) {
        let summary = aggregate(&records).unwrap();
        let expected: u64 = records.iter().map(|r| r.lines_of_code).sum();
        prop_assert_eq!(summary.total_loc, expected);
        prop_assert_eq!(summary.effective_kloc, expected as f64 / 1000.0);
        prop_assert!(summary.effective_kloc >= 0.0);
    }

    #[test]
    fn file_count_matches_distinct_paths(records in arb_records()) {
        let summary = aggregate(&records).unwrap();
        prop_assert_eq!(summary.file_count, records.len());
        prop_assert_eq!(summary.complexity_distribution.total(), records.len());
    }

    #[test]
    fn average_complexity_is_none_iff_all_unknown(records in arb_records()) {
        let summary = aggregate(&records).unwrap();
        let any_known = records.iter().any(|r| r.cyclomatic_complexity.is_some());
        prop_assert_eq!(summary.average_complexity.is_some(), any_known);
    }

    #[test]
    fn aggregation_is_deterministic(records in arb_records()) {
        prop_assert_eq!(aggregate(&records).unwrap(), aggregate(&records).unwrap());
    }
}
