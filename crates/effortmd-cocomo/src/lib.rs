//! # effortmd-cocomo
//!
//! **Tier 1 (Model Engine)**
//!
//! Basic and Intermediate COCOMO 81.
//!
//! ```text
//! effort   = a * KLOC^b * EAF      (person-months; EAF = 1 in basic mode)
//! schedule = c * effort^d          (months)
//! staffing = effort / schedule     (people)
//! ```
//!
//! The engine is a pure function of its inputs: identical inputs produce
//! bit-identical outputs, and nothing is rounded here.

mod drivers;
mod error;
mod heuristics;
pub mod tables;

use std::collections::BTreeMap;

use effortmd_types::{CocomoEstimate, Mode, ProjectClass, ProjectMetricsSummary};
use tracing::debug;

pub use drivers::{CostDriverSet, parse_driver, parse_rating};
pub use error::CocomoError;
pub use heuristics::{
    Classification, DriverSuggestion, classify, classify_with_rationale, complexity_score,
    driver_suggestions, suggest_drivers,
};

/// Estimate effort and schedule for an aggregated project.
///
/// `drivers` only matters in [`Mode::Intermediate`]; `None` means every
/// driver is Nominal.
pub fn estimate(
    summary: &ProjectMetricsSummary,
    project_class: ProjectClass,
    mode: Mode,
    drivers: Option<&CostDriverSet>,
) -> Result<CocomoEstimate, CocomoError> {
    estimate_kloc(summary.effective_kloc, project_class, mode, drivers)
}

/// Estimate from a raw size in KLOC.
pub fn estimate_kloc(
    kloc: f64,
    project_class: ProjectClass,
    mode: Mode,
    drivers: Option<&CostDriverSet>,
) -> Result<CocomoEstimate, CocomoError> {
    if !kloc.is_finite() || kloc <= 0.0 {
        return Err(CocomoError::InvalidSize { kloc });
    }

    let coefficients = tables::coefficients(project_class);
    let nominal_effort_pm = coefficients.a * kloc.powf(coefficients.b);

    let (eaf, assignments) = match mode {
        Mode::Basic => (1.0, BTreeMap::new()),
        Mode::Intermediate => {
            let nominal = CostDriverSet::nominal();
            let set = drivers.unwrap_or(&nominal);
            (set.eaf(), set.assignments())
        }
    };

    let effort_pm = nominal_effort_pm * eaf;
    let schedule_months = coefficients.c * effort_pm.powf(coefficients.d);
    if !effort_pm.is_finite() || !schedule_months.is_finite() || schedule_months <= 0.0 {
        return Err(CocomoError::DegenerateSchedule {
            effort: effort_pm,
            schedule: schedule_months,
        });
    }

    let estimate = CocomoEstimate {
        project_class,
        mode,
        kloc,
        coefficients,
        nominal_effort_pm,
        eaf,
        effort_pm,
        schedule_months,
        average_staffing: effort_pm / schedule_months,
        productivity_kloc_per_pm: kloc / effort_pm,
        drivers: assignments,
    };
    debug!(
        class = %project_class,
        mode = %mode,
        kloc,
        eaf,
        effort_pm,
        schedule_months,
        "cocomo estimate"
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organic_basic_one_kloc() {
        let est = estimate_kloc(1.0, ProjectClass::Organic, Mode::Basic, None).unwrap();
        assert_eq!(est.effort_pm, 2.4);
        assert!((est.schedule_months - 3.4867).abs() < 1e-4);
        assert_eq!(est.average_staffing, est.effort_pm / est.schedule_months);
        assert!(est.drivers.is_empty());
        assert_eq!(est.eaf, 1.0);
    }

    #[test]
    fn zero_and_negative_size_are_rejected() {
        for kloc in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                estimate_kloc(kloc, ProjectClass::Organic, Mode::Basic, None),
                Err(CocomoError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn basic_mode_ignores_drivers() {
        let drivers = CostDriverSet::from_named([("CPLX", "extra_high")]).unwrap();
        let with = estimate_kloc(5.0, ProjectClass::Embedded, Mode::Basic, Some(&drivers)).unwrap();
        let without = estimate_kloc(5.0, ProjectClass::Embedded, Mode::Basic, None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn intermediate_records_all_fifteen_drivers() {
        let est = estimate_kloc(2.0, ProjectClass::Organic, Mode::Intermediate, None).unwrap();
        assert_eq!(est.drivers.len(), 15);
        assert_eq!(est.effort_pm, est.nominal_effort_pm);
    }
}
