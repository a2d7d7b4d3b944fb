//! # effortmd-config
//!
//! **Tier 4 (Configuration)**
//!
//! CLI arguments and configuration file structures.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * User config (`config.json` profiles) and cost-driver rating files (TOML)
//! * Default values and enums
//!
//! ## What does NOT belong here
//! * Estimation logic
//! * I/O beyond reading config files

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use effortmd_types::{Mode, OutputFormat, ProjectClass};

/// Errors from reading configuration inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse driver ratings TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to parse config JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid driver assignment '{0}'; expected NAME=RATING (e.g. CPLX=high)")]
    InvalidDriverFlag(String),

    #[error("Unknown {field} '{value}' in profile '{profile}'")]
    InvalidProfileValue {
        profile: String,
        field: &'static str,
        value: String,
    },
}

/// COCOMO effort and schedule estimates from per-file code metrics.
#[derive(Parser, Debug)]
#[command(name = "effortmd", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,

    /// Configuration profile to use (from `<config dir>/effortmd/config.json`).
    #[arg(long, global = true)]
    pub profile: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Verbose output (repeat for more detail). `EFFORTMD_LOG` overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate effort and schedule for one metrics snapshot.
    Estimate(CliEstimateArgs),

    /// Estimate several codebases and render a side-by-side comparison.
    Compare(CliCompareArgs),

    /// Print the cost-driver multiplier table.
    Drivers(DriversArgs),
}

/// Project class selection; `auto` classifies from the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassChoice {
    Auto,
    Organic,
    Semidetached,
    Embedded,
}

impl ClassChoice {
    /// `None` means "classify from the metrics".
    pub fn fixed(self) -> Option<ProjectClass> {
        match self {
            ClassChoice::Auto => None,
            ClassChoice::Organic => Some(ProjectClass::Organic),
            ClassChoice::Semidetached => Some(ProjectClass::Semidetached),
            ClassChoice::Embedded => Some(ProjectClass::Embedded),
        }
    }
}

/// Model selection shared by `estimate` and `compare`.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Project class [default: auto].
    #[arg(long, value_enum)]
    pub class: Option<ClassChoice>,

    /// COCOMO formulation [default: basic].
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Rate a cost driver, e.g. `--driver CPLX=very_high`. Repeatable.
    /// Unrated drivers are Nominal.
    #[arg(long = "driver", value_name = "NAME=RATING")]
    pub driver: Vec<String>,

    /// TOML file with a `[drivers]` table of ratings.
    #[arg(long, value_name = "FILE")]
    pub drivers: Option<PathBuf>,

    /// Start from ratings suggested by the metrics before applying overrides.
    #[arg(long)]
    pub suggest_drivers: bool,

    /// Output format [default: md].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct CliEstimateArgs {
    /// Metrics input (JSON array, `{codebase, files}` object, or JSONL). `-` reads stdin.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Codebase identifier for the report [default: input's `codebase` or file stem].
    #[arg(long)]
    pub codebase: Option<String>,

    /// Write output to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CliCompareArgs {
    /// Metrics inputs, one per codebase.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Write output to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DriversArgs {
    /// Output format [default: md].
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

// -----------------------
// Config files
// -----------------------

/// Contents of `<config dir>/effortmd/config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub profiles: BTreeMap<String, Profile>,
}

impl UserConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// A named set of defaults. CLI flags win over profile values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub class: Option<String>,
    pub mode: Option<String>,
    pub format: Option<String>,
    pub suggest_drivers: Option<bool>,
    /// Driver code to rating, e.g. `{"RELY": "high"}`.
    pub drivers: BTreeMap<String, String>,
}

/// Cost-driver rating file:
///
/// ```toml
/// [drivers]
/// RELY = "high"
/// CPLX = "very_high"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverFile {
    pub drivers: BTreeMap<String, String>,
}

impl DriverFile {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Split a `NAME=RATING` flag.
pub fn parse_driver_flag(flag: &str) -> Result<(String, String), ConfigError> {
    match flag.split_once('=') {
        Some((name, rating)) if !name.trim().is_empty() && !rating.trim().is_empty() => {
            Ok((name.trim().to_string(), rating.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidDriverFlag(flag.to_string())),
    }
}

/// Resolve a profile string field through a clap value enum.
pub fn parse_profile_value<T: ValueEnum>(
    profile: &str,
    field: &'static str,
    value: &str,
) -> Result<T, ConfigError> {
    T::from_str(value, true).map_err(|_| ConfigError::InvalidProfileValue {
        profile: profile.to_string(),
        field,
        value: value.to_string(),
    })
}
