//! # effortmd-report
//!
//! **Tier 2 (Report Builder)**
//!
//! Composition only: a report carries every summary field, every estimate
//! field and the run metadata under canonical keys. Nothing is recomputed.

use effortmd_types::{
    CocomoEstimate, ComparisonRow, EstimateRationale, EstimationReport, ProjectMetricsSummary,
    REPORT_SCHEMA_VERSION, ReportMetadata,
};

/// Merge a summary, an estimate and run metadata into one report.
///
/// The class counts as caller-supplied and no assumptions are recorded; use
/// [`build_with_rationale`] when the tool chose defaults.
pub fn build(
    summary: &ProjectMetricsSummary,
    estimate: &CocomoEstimate,
    metadata: ReportMetadata,
) -> EstimationReport {
    build_with_rationale(summary, estimate, metadata, EstimateRationale::default())
}

/// [`build`], also carrying how the class was chosen and why defaults apply.
pub fn build_with_rationale(
    summary: &ProjectMetricsSummary,
    estimate: &CocomoEstimate,
    metadata: ReportMetadata,
    rationale: EstimateRationale,
) -> EstimationReport {
    EstimationReport {
        schema_version: REPORT_SCHEMA_VERSION,
        codebase: metadata.codebase,
        generated_at_ms: metadata.generated_at_ms,
        tool: metadata.tool,

        total_loc: summary.total_loc,
        effective_kloc: summary.effective_kloc,
        file_count: summary.file_count,
        function_count: summary.function_count,
        average_complexity: summary.average_complexity,
        average_function_complexity: summary.average_function_complexity,
        max_complexity: summary.max_complexity,
        complexity_distribution: summary.complexity_distribution,
        average_maintainability: summary.average_maintainability,
        maintainability_distribution: summary.maintainability_distribution,

        project_class: estimate.project_class,
        class_source: rationale.class_source,
        complexity_score: rationale.complexity_score,
        mode: estimate.mode,
        kloc: estimate.kloc,
        coefficients: estimate.coefficients,
        nominal_effort_pm: estimate.nominal_effort_pm,
        eaf: estimate.eaf,
        effort_pm: estimate.effort_pm,
        schedule_months: estimate.schedule_months,
        average_staffing: estimate.average_staffing,
        productivity_kloc_per_pm: estimate.productivity_kloc_per_pm,
        drivers: estimate.drivers.clone(),
        assumptions: rationale.assumptions,

        warnings: summary.warnings.clone(),
    }
}

/// Project reports to comparison rows, preserving input order.
pub fn compare(reports: &[EstimationReport]) -> Vec<ComparisonRow> {
    reports.iter().map(comparison_row).collect()
}

pub fn comparison_row(report: &EstimationReport) -> ComparisonRow {
    ComparisonRow {
        codebase: report.codebase.clone(),
        project_class: report.project_class,
        mode: report.mode,
        kloc: report.kloc,
        effort_pm: report.effort_pm,
        schedule_months: report.schedule_months,
        average_staffing: report.average_staffing,
        eaf: report.eaf,
        productivity_kloc_per_pm: report.productivity_kloc_per_pm,
    }
}
