//! Metric-driven defaults for callers that do not know their project class
//! or cost-driver ratings.
//!
//! Every default comes with a one-sentence reason so reports can state the
//! assumptions an estimate rests on.

use effortmd_types::{CostDriver, ProjectClass, ProjectMetricsSummary, Rating};

use crate::drivers::CostDriverSet;
use crate::error::CocomoError;

const ORGANIC_MAX_KLOC: f64 = 50.0;
const SEMIDETACHED_MAX_KLOC: f64 = 300.0;

/// A class picked from the metrics, with the reason for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub class: ProjectClass,
    pub complexity_score: u8,
    pub rationale: String,
}

/// One suggested rating and why it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSuggestion {
    pub driver: CostDriver,
    pub rating: Rating,
    pub rationale: String,
}

/// Classify a project from its size, structure and complexity.
///
/// Below 50 KLOC a project is Organic unless its complexity score reaches 2,
/// in which case it is Semidetached. 50 to 300 KLOC is Semidetached, anything
/// larger is Embedded.
pub fn classify(summary: &ProjectMetricsSummary) -> ProjectClass {
    classify_with_rationale(summary).class
}

/// [`classify`], keeping the score and a sentence naming the deciding inputs.
pub fn classify_with_rationale(summary: &ProjectMetricsSummary) -> Classification {
    let kloc = summary.effective_kloc;
    let score = complexity_score(summary);
    let basis = format!(
        "complexity score {score}/4 from {} and {} files",
        describe_complexity(summary),
        summary.file_count
    );

    let (class, rationale) = if kloc < ORGANIC_MAX_KLOC {
        if score >= 2 {
            (
                ProjectClass::Semidetached,
                format!("{kloc:.3} KLOC is under {ORGANIC_MAX_KLOC} KLOC but {basis} reaches 2"),
            )
        } else {
            (
                ProjectClass::Organic,
                format!("{kloc:.3} KLOC is under {ORGANIC_MAX_KLOC} KLOC and {basis} is below 2"),
            )
        }
    } else if kloc < SEMIDETACHED_MAX_KLOC {
        (
            ProjectClass::Semidetached,
            format!(
                "{kloc:.3} KLOC is between {ORGANIC_MAX_KLOC} and {SEMIDETACHED_MAX_KLOC} KLOC"
            ),
        )
    } else {
        (
            ProjectClass::Embedded,
            format!("{kloc:.3} KLOC is at least {SEMIDETACHED_MAX_KLOC} KLOC"),
        )
    };

    Classification {
        class,
        complexity_score: score,
        rationale: format!("Classified as '{class}': {rationale}"),
    }
}

/// 0..=4; unknown complexity contributes nothing.
pub fn complexity_score(summary: &ProjectMetricsSummary) -> u8 {
    let mut score = 0;
    match typical_complexity(summary) {
        Some(cc) if cc > 10.0 => score += 2,
        Some(cc) if cc > 5.0 => score += 1,
        _ => {}
    }
    if summary.file_count > 50 {
        score += 2;
    } else if summary.file_count > 20 {
        score += 1;
    }
    score
}

/// Ratings typical of a small open-source project with modern tooling.
///
/// Product complexity follows the measured complexity; everything else is a
/// fixed assumption.
pub fn suggest_drivers(summary: &ProjectMetricsSummary) -> Result<CostDriverSet, CocomoError> {
    driver_suggestions(summary)
        .iter()
        .try_fold(CostDriverSet::nominal(), |set, s| set.with(s.driver, s.rating))
}

/// The ratings behind [`suggest_drivers`], in driver order, with reasons.
///
/// RELY and SCED are listed at Nominal because that is itself an assumption
/// worth stating; the other unlisted drivers are Nominal without comment.
pub fn driver_suggestions(summary: &ProjectMetricsSummary) -> Vec<DriverSuggestion> {
    let cplx = match typical_complexity(summary) {
        Some(cc) if cc > 10.0 => Rating::VeryHigh,
        Some(cc) if cc > 5.0 => Rating::High,
        _ => Rating::Nominal,
    };
    let cplx_reason = format!("Follows measured {}", describe_complexity(summary));

    let fixed = [
        (
            CostDriver::Rely,
            Rating::Nominal,
            "Typical utility software; failures are an inconvenience, not a hazard",
        ),
        (
            CostDriver::Data,
            Rating::Low,
            "Simple data persistence with a small database",
        ),
        (
            CostDriver::Turn,
            Rating::Low,
            "Modern build and test tooling keeps turnaround short",
        ),
        (
            CostDriver::Acap,
            Rating::High,
            "Open-source projects tend to attract skilled analysts",
        ),
        (
            CostDriver::Pcap,
            Rating::High,
            "Open-source projects tend to attract skilled programmers",
        ),
        (
            CostDriver::Vexp,
            Rating::High,
            "Mainstream platforms the team already knows",
        ),
        (
            CostDriver::Lexp,
            Rating::High,
            "Established language with a familiar ecosystem",
        ),
        (
            CostDriver::Modp,
            Rating::High,
            "Version control, code review and testing are routine",
        ),
        (
            CostDriver::Tool,
            Rating::High,
            "Rich editor, linter and CI tooling",
        ),
        (
            CostDriver::Sced,
            Rating::Nominal,
            "No critical deadline",
        ),
    ];

    let mut suggestions: Vec<DriverSuggestion> = fixed
        .into_iter()
        .map(|(driver, rating, reason)| DriverSuggestion {
            driver,
            rating,
            rationale: reason.to_string(),
        })
        .collect();
    suggestions.push(DriverSuggestion {
        driver: CostDriver::Cplx,
        rating: cplx,
        rationale: cplx_reason,
    });
    suggestions.sort_by_key(|s| s.driver.index());
    suggestions
}

// Per-function average when the provider reported functions, else per file.
fn typical_complexity(summary: &ProjectMetricsSummary) -> Option<f64> {
    summary
        .average_function_complexity
        .or(summary.average_complexity)
}

fn describe_complexity(summary: &ProjectMetricsSummary) -> String {
    match (
        summary.average_function_complexity,
        summary.average_complexity,
    ) {
        (Some(cc), _) => format!("average function complexity {cc:.2}"),
        (None, Some(cc)) => format!("average file complexity {cc:.2}"),
        (None, None) => "unknown complexity".to_string(),
    }
}
