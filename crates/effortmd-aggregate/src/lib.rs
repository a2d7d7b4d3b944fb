//! # effortmd-aggregate
//!
//! **Tier 1 (Metrics Aggregator)**
//!
//! Turns the per-file records of an external metrics provider into one
//! [`ProjectMetricsSummary`]. The aggregation is a pure function of its input.
//!
//! ## Policies
//! * Empty input is fatal ([`AggregateError::EmptyInput`]).
//! * Duplicate paths: the last record in input order wins and a
//!   [`AggregateWarning::DuplicatePath`] is recorded.
//! * Missing complexity stays unknown (`None`), never zero.

use std::collections::{BTreeMap, BTreeSet};

use effortmd_math::mean;
use effortmd_types::{
    AggregateWarning, ComplexityDistribution, MaintainabilityDistribution, ProjectMetricsSummary,
    RawFileMetric,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Fatal aggregation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("no file metrics supplied; an empty codebase has no defined cost")]
    EmptyInput,

    #[error("record {index} ('{path}') has an invalid {field}: {reason}")]
    InvalidRecord {
        index: usize,
        path: String,
        field: &'static str,
        reason: String,
    },
}

/// Aggregate raw per-file metrics into a project summary.
pub fn aggregate(records: &[RawFileMetric]) -> Result<ProjectMetricsSummary, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    let mut latest: BTreeMap<&str, &RawFileMetric> = BTreeMap::new();
    let mut duplicates: BTreeSet<&str> = BTreeSet::new();
    for (index, record) in records.iter().enumerate() {
        validate(index, record)?;
        if latest.insert(record.path.as_str(), record).is_some() {
            duplicates.insert(record.path.as_str());
        }
    }

    let mut warnings: Vec<AggregateWarning> = duplicates
        .into_iter()
        .map(|path| {
            warn!(path, "duplicate path in metrics input; keeping the last entry");
            AggregateWarning::DuplicatePath {
                path: path.to_string(),
            }
        })
        .collect();

    let files: Vec<&RawFileMetric> = latest.into_values().collect();
    let total_loc = sum_loc(records, &files)?;

    let mut complexity_distribution = ComplexityDistribution::default();
    let mut maintainability_distribution = MaintainabilityDistribution::default();
    for file in &files {
        complexity_distribution.record(file.representative_complexity());
        maintainability_distribution.record(file.maintainability_index);
    }

    let average_complexity = mean(
        files
            .iter()
            .filter_map(|f| f.representative_complexity())
            .map(f64::from),
    );
    let max_complexity = files
        .iter()
        .filter_map(|f| f.representative_complexity())
        .max();
    let function_count = files.iter().map(|f| f.function_complexities.len()).sum();
    let average_function_complexity = mean(
        files
            .iter()
            .flat_map(|f| f.function_complexities.iter().copied())
            .map(f64::from),
    );
    let average_maintainability = mean(files.iter().filter_map(|f| f.maintainability_index));

    if average_complexity.is_none() {
        warn!("no file carries complexity data; average complexity is unknown");
        warnings.push(AggregateWarning::MissingComplexity);
    }
    if average_maintainability.is_none() {
        debug!("no file carries a maintainability index");
        warnings.push(AggregateWarning::MissingMaintainability);
    }

    let summary = ProjectMetricsSummary {
        total_loc,
        effective_kloc: total_loc as f64 / 1000.0,
        file_count: files.len(),
        function_count,
        average_complexity,
        average_function_complexity,
        max_complexity,
        complexity_distribution,
        average_maintainability,
        maintainability_distribution,
        warnings,
    };
    debug!(
        files = summary.file_count,
        total_loc = summary.total_loc,
        kloc = summary.effective_kloc,
        "aggregated metrics"
    );
    Ok(summary)
}

fn validate(index: usize, record: &RawFileMetric) -> Result<(), AggregateError> {
    if record.path.trim().is_empty() {
        return Err(AggregateError::InvalidRecord {
            index,
            path: record.path.clone(),
            field: "path",
            reason: "path must not be empty".to_string(),
        });
    }
    if let Some(mi) = record.maintainability_index
        && !mi.is_finite()
    {
        return Err(AggregateError::InvalidRecord {
            index,
            path: record.path.clone(),
            field: "maintainability_index",
            reason: format!("expected a finite number, got {mi}"),
        });
    }
    Ok(())
}

fn sum_loc(records: &[RawFileMetric], files: &[&RawFileMetric]) -> Result<u64, AggregateError> {
    let mut total: u64 = 0;
    for file in files {
        total = total.checked_add(file.lines_of_code).ok_or_else(|| {
            let index = records
                .iter()
                .rposition(|r| r.path == file.path)
                .unwrap_or_default();
            AggregateError::InvalidRecord {
                index,
                path: file.path.clone(),
                field: "lines_of_code",
                reason: "total lines of code overflows u64".to_string(),
            }
        })?;
    }
    Ok(total)
}
