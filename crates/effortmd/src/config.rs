use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use effortmd_cocomo::{CostDriverSet, driver_suggestions, suggest_drivers};
use effortmd_config as cli;
use effortmd_types::{Mode, OutputFormat, ProjectClass, ProjectMetricsSummary};
use tracing::{debug, warn};

/// Overrides the config file location (`<config dir>/effortmd/config.json`).
pub(crate) const CONFIG_ENV: &str = "EFFORTMD_CONFIG";

pub(crate) fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(dirs::config_dir()?.join("effortmd").join("config.json")),
    }
}

pub(crate) fn load_config() -> Option<cli::UserConfig> {
    let config_path = config_path()?;
    if !config_path.exists() {
        return None;
    }

    let content = std::fs::read_to_string(&config_path).ok()?;
    match cli::UserConfig::from_json(&content) {
        Ok(config) => {
            debug!(path = %config_path.display(), "loaded user config");
            Some(config)
        }
        Err(err) => {
            warn!(path = %config_path.display(), "ignoring unreadable user config: {err}");
            None
        }
    }
}

/// The profile in effect, with the name it was found under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveProfile<'a> {
    pub name: &'a str,
    pub profile: &'a cli::Profile,
}

pub(crate) fn resolve_profile<'a>(
    config: &'a Option<cli::UserConfig>,
    name: Option<&String>,
) -> Option<ActiveProfile<'a>> {
    config.as_ref().and_then(|c| {
        let key = name.map(|s| s.as_str()).unwrap_or("default");
        c.profiles
            .get_key_value(key)
            .map(|(name, profile)| ActiveProfile { name, profile })
    })
}

/// Model settings after merging CLI flags over the profile.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedModel {
    /// `None` classifies each codebase from its metrics.
    pub class: Option<ProjectClass>,
    pub mode: Mode,
    pub format: OutputFormat,
    pub suggest_drivers: bool,
    /// Explicit ratings: profile, then `--drivers` file, then `--driver` flags.
    pub overrides: CostDriverSet,
}

impl ResolvedModel {
    /// Ratings for one codebase: suggestions (when enabled) under the overrides.
    pub(crate) fn drivers_for(&self, summary: &ProjectMetricsSummary) -> Result<CostDriverSet> {
        let mut drivers = if self.suggest_drivers {
            suggest_drivers(summary).context("Failed to derive suggested cost drivers")?
        } else {
            CostDriverSet::nominal()
        };
        drivers.merge(&self.overrides);
        Ok(drivers)
    }

    /// Reasons for the suggested ratings that survive the overrides, keyed
    /// by driver code. Empty unless suggestions feed an intermediate estimate.
    pub(crate) fn driver_assumptions(
        &self,
        summary: &ProjectMetricsSummary,
    ) -> BTreeMap<String, String> {
        if !self.suggest_drivers || self.mode != Mode::Intermediate {
            return BTreeMap::new();
        }
        driver_suggestions(summary)
            .into_iter()
            .filter(|s| !self.overrides.contains(s.driver))
            .map(|s| {
                (
                    s.driver.code().to_string(),
                    format!("{} ({})", s.rationale, s.rating),
                )
            })
            .collect()
    }
}

pub(crate) fn resolve_model(
    args: &cli::ModelArgs,
    profile: Option<ActiveProfile<'_>>,
) -> Result<ResolvedModel> {
    let class = match args.class {
        Some(choice) => choice,
        None => profile_value(profile, "class", |p| p.class.as_deref())?
            .unwrap_or(cli::ClassChoice::Auto),
    };

    let mut overrides = CostDriverSet::nominal();
    if let Some(active) = profile {
        let from_profile = CostDriverSet::from_named(&active.profile.drivers)
            .with_context(|| format!("Invalid driver rating in profile '{}'", active.name))?;
        overrides.merge(&from_profile);
    }
    if let Some(path) = &args.drivers {
        let file = cli::DriverFile::from_file(path)
            .with_context(|| format!("Failed to load driver ratings from {}", path.display()))?;
        let from_file = CostDriverSet::from_named(&file.drivers)
            .with_context(|| format!("Invalid driver rating in {}", path.display()))?;
        overrides.merge(&from_file);
    }
    for flag in &args.driver {
        let (name, rating) = cli::parse_driver_flag(flag)?;
        let from_flag = CostDriverSet::from_named([(name, rating)])
            .with_context(|| format!("Invalid --driver {flag}"))?;
        overrides.merge(&from_flag);
    }

    let suggest_drivers = args.suggest_drivers
        || profile
            .and_then(|p| p.profile.suggest_drivers)
            .unwrap_or(false);

    // Rating any driver implies the intermediate model unless a mode was chosen.
    let mode = match args.mode {
        Some(mode) => mode,
        None => profile_value(profile, "mode", |p| p.mode.as_deref())?.unwrap_or(
            if suggest_drivers || !overrides.is_empty() {
                Mode::Intermediate
            } else {
                Mode::Basic
            },
        ),
    };
    if mode == Mode::Basic && (suggest_drivers || !overrides.is_empty()) {
        warn!("cost-driver ratings are ignored by the basic model; use --mode intermediate");
    }

    Ok(ResolvedModel {
        class: class.fixed(),
        mode,
        format: resolve_format(args.format, profile)?,
        suggest_drivers,
        overrides,
    })
}

pub(crate) fn resolve_format(
    format: Option<OutputFormat>,
    profile: Option<ActiveProfile<'_>>,
) -> Result<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => Ok(profile_value(profile, "format", |p| p.format.as_deref())?.unwrap_or_default()),
    }
}

fn profile_value<T: clap::ValueEnum>(
    profile: Option<ActiveProfile<'_>>,
    field: &'static str,
    get: impl Fn(&cli::Profile) -> Option<&str>,
) -> Result<Option<T>> {
    let Some(active) = profile else {
        return Ok(None);
    };
    match get(active.profile) {
        Some(value) => Ok(Some(cli::parse_profile_value(active.name, field, value)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use effortmd_types::{CostDriver, Rating};

    use super::*;

    fn profile(mode: Option<&str>, drivers: &[(&str, &str)]) -> cli::Profile {
        cli::Profile {
            mode: mode.map(str::to_string),
            drivers: drivers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            ..cli::Profile::default()
        }
    }

    fn active<'a>(p: &'a cli::Profile) -> Option<ActiveProfile<'a>> {
        Some(ActiveProfile {
            name: "test",
            profile: p,
        })
    }

    #[test]
    fn defaults_are_auto_basic_markdown() {
        let model = resolve_model(&cli::ModelArgs::default(), None).unwrap();
        assert_eq!(model.class, None);
        assert_eq!(model.mode, Mode::Basic);
        assert_eq!(model.format, OutputFormat::Md);
        assert!(model.overrides.is_empty());
    }

    #[test]
    fn driver_flag_overrides_profile_rating() {
        let p = profile(None, &[("CPLX", "low"), ("ACAP", "high")]);
        let args = cli::ModelArgs {
            driver: vec!["CPLX=very_high".into()],
            ..cli::ModelArgs::default()
        };
        let model = resolve_model(&args, active(&p)).unwrap();
        assert_eq!(model.overrides.rating(CostDriver::Cplx), Rating::VeryHigh);
        assert_eq!(model.overrides.rating(CostDriver::Acap), Rating::High);
        assert_eq!(model.mode, Mode::Intermediate);
    }

    #[test]
    fn explicit_mode_beats_profile_mode() {
        let p = profile(Some("intermediate"), &[]);
        let args = cli::ModelArgs {
            mode: Some(Mode::Basic),
            ..cli::ModelArgs::default()
        };
        assert_eq!(resolve_model(&args, active(&p)).unwrap().mode, Mode::Basic);
        assert_eq!(
            resolve_model(&cli::ModelArgs::default(), active(&p))
                .unwrap()
                .mode,
            Mode::Intermediate
        );
    }

    #[test]
    fn invalid_profile_mode_is_an_error() {
        let p = profile(Some("advanced"), &[]);
        let err = resolve_model(&cli::ModelArgs::default(), active(&p)).unwrap_err();
        assert!(format!("{err:#}").contains("advanced"));
    }

    #[test]
    fn overridden_suggestions_carry_no_assumption() {
        let summary = effortmd_aggregate::aggregate(&[
            effortmd_types::RawFileMetric::new("a.py", 800).with_functions([3, 9])
        ])
        .unwrap();
        let args = cli::ModelArgs {
            suggest_drivers: true,
            driver: vec!["TOOL=low".into()],
            ..cli::ModelArgs::default()
        };
        let model = resolve_model(&args, None).unwrap();
        let notes = model.driver_assumptions(&summary);
        assert!(!notes.contains_key("TOOL"));
        assert!(notes["CPLX"].ends_with("(High)"));
        assert!(notes["DATA"].ends_with("(Low)"));
        assert_eq!(notes.len(), 10);

        let basic = ResolvedModel {
            mode: Mode::Basic,
            ..model
        };
        assert!(basic.driver_assumptions(&summary).is_empty());
    }

    #[test]
    fn malformed_driver_flag_is_an_error() {
        let args = cli::ModelArgs {
            driver: vec!["CPLX".into()],
            ..cli::ModelArgs::default()
        };
        assert!(resolve_model(&args, None).is_err());
    }
}
