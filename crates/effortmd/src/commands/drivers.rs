use anyhow::Result;
use effortmd_config as cli;
use effortmd_format as format;

use crate::config::{self, ActiveProfile};

pub(crate) fn handle(args: cli::DriversArgs, profile: Option<ActiveProfile<'_>>) -> Result<()> {
    let format = config::resolve_format(args.format, profile)?;
    let table = format::render_driver_table(format)?;
    super::write_output(&table, None)
}
