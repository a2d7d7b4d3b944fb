//! JSON contract tests: the serde keys are the stable interface.

use effortmd_types::*;
use serde_json::{Value, json};

#[test]
fn given_minimal_record_json_when_deserialized_then_optional_fields_default() {
    let metric: RawFileMetric =
        serde_json::from_value(json!({"path": "src/main.rs", "lines_of_code": 42}))
            .expect("parse record");
    assert_eq!(metric.path, "src/main.rs");
    assert_eq!(metric.lines_of_code, 42);
    assert_eq!(metric.cyclomatic_complexity, None);
    assert!(metric.function_complexities.is_empty());
    assert_eq!(metric.maintainability_index, None);
}

#[test]
fn given_record_without_optionals_when_serialized_then_they_are_omitted() {
    let value = serde_json::to_value(RawFileMetric::new("a.rs", 1)).expect("serialize");
    assert_eq!(value, json!({"path": "a.rs", "lines_of_code": 1}));
}

#[test]
fn selector_enums_use_lowercase_names() {
    assert_eq!(
        serde_json::to_value(ProjectClass::Semidetached).unwrap(),
        json!("semidetached")
    );
    assert_eq!(
        serde_json::to_value(Mode::Intermediate).unwrap(),
        json!("intermediate")
    );
    assert_eq!(
        serde_json::to_value(Rating::VeryHigh).unwrap(),
        json!("very_high")
    );
    assert_eq!(serde_json::to_value(CostDriver::Cplx).unwrap(), json!("CPLX"));
}

#[test]
fn warnings_are_tagged_by_kind() {
    let value = serde_json::to_value(vec![
        AggregateWarning::MissingComplexity,
        AggregateWarning::DuplicatePath {
            path: "x.rs".into(),
        },
    ])
    .unwrap();
    assert_eq!(
        value,
        json!([
            {"kind": "missing_complexity"},
            {"kind": "duplicate_path", "path": "x.rs"}
        ])
    );
}

#[test]
fn unknown_average_complexity_serializes_as_null_not_zero() {
    let summary = ProjectMetricsSummary {
        total_loc: 10,
        effective_kloc: 0.01,
        file_count: 1,
        function_count: 0,
        average_complexity: None,
        average_function_complexity: None,
        max_complexity: None,
        complexity_distribution: ComplexityDistribution {
            unknown: 1,
            ..Default::default()
        },
        average_maintainability: None,
        maintainability_distribution: MaintainabilityDistribution::default(),
        warnings: vec![AggregateWarning::MissingComplexity],
    };
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["average_complexity"], Value::Null);
    assert_eq!(value["complexity_distribution"]["unknown"], json!(1));
}

#[test]
fn cost_driver_codes_are_unique_and_uppercase() {
    let mut codes: Vec<&str> = CostDriver::ALL.iter().map(|d| d.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 15);
    assert!(codes.iter().all(|c| c.chars().all(|ch| ch.is_ascii_uppercase())));
}

#[test]
fn cost_driver_categories_match_published_grouping() {
    let count = |cat: DriverCategory| {
        CostDriver::ALL
            .iter()
            .filter(|d| d.category() == cat)
            .count()
    };
    assert_eq!(count(DriverCategory::Product), 3);
    assert_eq!(count(DriverCategory::Computer), 4);
    assert_eq!(count(DriverCategory::Personnel), 5);
    assert_eq!(count(DriverCategory::Project), 3);
}

#[test]
fn provider_camel_case_function_key_is_accepted() {
    let json = r#"{"path":"a.py","lines_of_code":40,"cyclomaticComplexityPerFunction":[2,9]}"#;
    let metric: RawFileMetric = serde_json::from_str(json).unwrap();
    assert_eq!(metric.function_complexities, vec![2, 9]);
    assert_eq!(metric.representative_complexity(), Some(9));
}

#[test]
fn provider_camel_case_record_keys_are_accepted() {
    let json = r#"{
        "path": "app/models.py",
        "linesOfCode": 120,
        "cyclomaticComplexity": 7,
        "maintainabilityIndex": 64.5
    }"#;
    let metric: RawFileMetric = serde_json::from_str(json).unwrap();
    assert_eq!(metric.lines_of_code, 120);
    assert_eq!(metric.cyclomatic_complexity, Some(7));
    assert_eq!(metric.maintainability_index, Some(64.5));

    // Output always uses the canonical snake_case keys.
    let value = serde_json::to_value(&metric).unwrap();
    assert_eq!(value["lines_of_code"], json!(120));
    assert!(value.get("linesOfCode").is_none());
}

#[test]
fn class_source_serializes_snake_case_and_defaults_to_explicit() {
    assert_eq!(
        serde_json::to_value(ClassSource::Classified).unwrap(),
        json!("classified")
    );
    assert_eq!(ClassSource::default(), ClassSource::Explicit);
    assert_eq!(ClassSource::Classified.to_string(), "classified");
}
