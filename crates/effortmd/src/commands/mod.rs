pub(crate) mod compare;
pub(crate) mod drivers;
pub(crate) mod estimate;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use effortmd_config as cli;
use tracing::info;

use crate::config::ActiveProfile;

pub(crate) fn dispatch(cli: cli::Cli, profile: Option<ActiveProfile<'_>>) -> Result<()> {
    match cli.command {
        cli::Commands::Estimate(args) => estimate::handle(args, profile),
        cli::Commands::Compare(args) => compare::handle(args, profile),
        cli::Commands::Drivers(args) => drivers::handle(args, profile),
    }
}

/// Write rendered output to `out`, or stdout when absent.
pub(crate) fn write_output(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
