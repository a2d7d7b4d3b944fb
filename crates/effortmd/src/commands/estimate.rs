use std::collections::BTreeMap;

use anyhow::{Context, Result};
use effortmd_aggregate::aggregate;
use effortmd_cocomo as cocomo;
use effortmd_config as cli;
use effortmd_format as format;
use effortmd_report as report;
use effortmd_types::{
    ClassSource, EstimateRationale, EstimationReport, RawFileMetric, ReportMetadata, ToolInfo,
};
use tracing::info;

use crate::config::{self, ActiveProfile, ResolvedModel};
use crate::input;

pub(crate) fn handle(args: cli::CliEstimateArgs, profile: Option<ActiveProfile<'_>>) -> Result<()> {
    let model = config::resolve_model(&args.model, profile)?;
    let input = input::load(&args.input)?;
    let codebase = args
        .codebase
        .clone()
        .unwrap_or_else(|| input.codebase_name());

    let report = estimate_codebase(&input.files, codebase, &model)?;
    let rendered = format::render_report(&report, model.format)?;
    super::write_output(&rendered, args.out.as_deref())
}

/// Aggregate, classify, estimate and compose the report for one codebase.
pub(crate) fn estimate_codebase(
    files: &[RawFileMetric],
    codebase: String,
    model: &ResolvedModel,
) -> Result<EstimationReport> {
    let summary =
        aggregate(files).with_context(|| format!("Failed to aggregate metrics for '{codebase}'"))?;

    let mut assumptions = BTreeMap::new();
    let (class, class_source) = match model.class {
        Some(class) => (class, ClassSource::Explicit),
        None => {
            let classification = cocomo::classify_with_rationale(&summary);
            info!(
                codebase = %codebase,
                kloc = summary.effective_kloc,
                class = %classification.class,
                score = classification.complexity_score,
                "classified project"
            );
            assumptions.insert("project_class".to_string(), classification.rationale);
            (classification.class, ClassSource::Classified)
        }
    };
    let drivers = model.drivers_for(&summary)?;
    assumptions.extend(model.driver_assumptions(&summary));
    let estimate = cocomo::estimate(&summary, class, model.mode, Some(&drivers))
        .with_context(|| format!("Failed to estimate '{codebase}'"))?;

    Ok(report::build_with_rationale(
        &summary,
        &estimate,
        ReportMetadata {
            codebase,
            generated_at_ms: crate::now_ms(),
            tool: ToolInfo::current(),
        },
        EstimateRationale {
            class_source,
            complexity_score: cocomo::complexity_score(&summary),
            assumptions,
        },
    ))
}
