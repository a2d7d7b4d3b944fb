//! # effortmd
//!
//! **CLI Binary**
//!
//! Entry point for the `effortmd` command-line application. It wires the
//! aggregator, the model engine, the report builder and the renderers
//! together.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Install the log subscriber
//! * Load configuration and resolve the active profile
//! * Dispatch commands and map errors to an exit code
//!
//! This crate should contain minimal business logic.

mod commands;
mod config;
mod error_hints;
mod input;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use effortmd_config::Cli;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "EFFORTMD_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let user_config = config::load_config();
    let profile = config::resolve_profile(&user_config, cli.profile.as_ref());
    if let Some(name) = cli.profile.as_deref()
        && profile.is_none()
    {
        anyhow::bail!("Profile '{name}' not found in the user config");
    }

    commands::dispatch(cli, profile)
}

pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    // A subscriber may already be installed when embedded; keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn now_ms() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
