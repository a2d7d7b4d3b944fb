use anyhow::Result;
use effortmd_config as cli;
use effortmd_format as format;
use effortmd_report as report;
use tracing::debug;

use crate::config::{self, ActiveProfile};
use crate::input;

use super::estimate::estimate_codebase;

/// Independent pipelines run one after another; nothing is shared between
/// codebases except the resolved model settings.
pub(crate) fn handle(args: cli::CliCompareArgs, profile: Option<ActiveProfile<'_>>) -> Result<()> {
    let model = config::resolve_model(&args.model, profile)?;

    let mut reports = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let input = input::load(path)?;
        let codebase = input.codebase_name();
        debug!(codebase = %codebase, "estimating for comparison");
        reports.push(estimate_codebase(&input.files, codebase, &model)?);
    }

    let rows = report::compare(&reports);
    let rendered = format::render_comparison(&rows, model.format)?;
    super::write_output(&rendered, args.out.as_deref())
}
