//! # effortmd-types
//!
//! **Tier 0 (Core Types)**
//!
//! This crate defines the data structures and contracts shared by every
//! `effortmd` crate: raw per-file metrics, the aggregated project summary,
//! COCOMO selectors and estimates, and the estimation report.
//!
//! ## Stability Policy
//!
//! **JSON-first stability**: the serde field names are the contract. Removed or
//! renamed report fields bump [`REPORT_SCHEMA_VERSION`].
//!
//! ## What belongs here
//! * Pure data structs and closed enums
//! * Serialization/Deserialization logic
//! * Stability markers (`REPORT_SCHEMA_VERSION`)
//!
//! ## What does NOT belong here
//! * File I/O
//! * CLI argument parsing (enums only derive `clap::ValueEnum` behind the `clap` feature)
//! * Model formulas or coefficient tables

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Schema version of [`EstimationReport`].
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Files whose representative complexity is below this value are `low`.
pub const COMPLEXITY_MEDIUM_MIN: u32 = 10;

/// Files whose representative complexity is above this value are `high`.
pub const COMPLEXITY_HIGH_ABOVE: u32 = 20;

// -----------------------
// Raw metrics (input)
// -----------------------

/// One entry per source file, as produced by an external metrics provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFileMetric {
    pub path: String,
    /// Logical lines, excluding blanks and comments.
    #[serde(alias = "linesOfCode")]
    pub lines_of_code: u64,
    /// Provider-combined per-file cyclomatic complexity.
    #[serde(
        default,
        alias = "cyclomaticComplexity",
        skip_serializing_if = "Option::is_none"
    )]
    pub cyclomatic_complexity: Option<u32>,
    /// Per-function cyclomatic complexity, when the provider reports it.
    #[serde(
        default,
        alias = "cyclomaticComplexityPerFunction",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub function_complexities: Vec<u32>,
    #[serde(
        default,
        alias = "maintainabilityIndex",
        skip_serializing_if = "Option::is_none"
    )]
    pub maintainability_index: Option<f64>,
}

impl RawFileMetric {
    pub fn new(path: impl Into<String>, lines_of_code: u64) -> Self {
        Self {
            path: path.into(),
            lines_of_code,
            cyclomatic_complexity: None,
            function_complexities: Vec::new(),
            maintainability_index: None,
        }
    }

    #[must_use]
    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.cyclomatic_complexity = Some(complexity);
        self
    }

    #[must_use]
    pub fn with_functions(mut self, complexities: impl IntoIterator<Item = u32>) -> Self {
        self.function_complexities = complexities.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_maintainability(mut self, index: f64) -> Self {
        self.maintainability_index = Some(index);
        self
    }

    /// The value used to bucket this file.
    ///
    /// The maximum among the file's functions wins when they are reported, so
    /// many trivial functions cannot dilute a single complex one.
    pub fn representative_complexity(&self) -> Option<u32> {
        self.function_complexities
            .iter()
            .copied()
            .max()
            .or(self.cyclomatic_complexity)
    }
}

// -----------------------
// Aggregated summary
// -----------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityBand {
    Low,
    Medium,
    High,
}

impl ComplexityBand {
    pub fn for_complexity(value: u32) -> Self {
        if value < COMPLEXITY_MEDIUM_MIN {
            ComplexityBand::Low
        } else if value <= COMPLEXITY_HIGH_ABOVE {
            ComplexityBand::Medium
        } else {
            ComplexityBand::High
        }
    }
}

/// File counts per complexity band, in ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    /// Files with no complexity data at all.
    pub unknown: usize,
}

impl ComplexityDistribution {
    pub fn record(&mut self, value: Option<u32>) {
        match value.map(ComplexityBand::for_complexity) {
            Some(ComplexityBand::Low) => self.low += 1,
            Some(ComplexityBand::Medium) => self.medium += 1,
            Some(ComplexityBand::High) => self.high += 1,
            None => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintainabilityGrade {
    A,
    B,
    C,
}

impl MaintainabilityGrade {
    pub fn for_score(score: f64) -> Self {
        if score >= 85.0 {
            MaintainabilityGrade::A
        } else if score >= 65.0 {
            MaintainabilityGrade::B
        } else {
            MaintainabilityGrade::C
        }
    }
}

/// File counts per maintainability grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintainabilityDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub unknown: usize,
}

impl MaintainabilityDistribution {
    pub fn record(&mut self, index: Option<f64>) {
        match index.map(MaintainabilityGrade::for_score) {
            Some(MaintainabilityGrade::A) => self.a += 1,
            Some(MaintainabilityGrade::B) => self.b += 1,
            Some(MaintainabilityGrade::C) => self.c += 1,
            None => self.unknown += 1,
        }
    }
}

/// Non-fatal conditions detected while aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateWarning {
    /// No file carried complexity data; `average_complexity` is unknown.
    MissingComplexity,
    /// No file carried a maintainability index.
    MissingMaintainability,
    /// The same path appeared more than once; the last entry was kept.
    DuplicatePath { path: String },
}

impl fmt::Display for AggregateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateWarning::MissingComplexity => {
                write!(f, "no file carries complexity data; average complexity is unknown")
            }
            AggregateWarning::MissingMaintainability => {
                write!(f, "no file carries a maintainability index")
            }
            AggregateWarning::DuplicatePath { path } => {
                write!(f, "duplicate path '{path}'; keeping the last entry")
            }
        }
    }
}

/// Project-level view of one metrics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetricsSummary {
    pub total_loc: u64,
    pub effective_kloc: f64,
    pub file_count: usize,
    pub function_count: usize,
    /// Mean representative complexity over files where it is known.
    pub average_complexity: Option<f64>,
    /// Mean over every reported function.
    pub average_function_complexity: Option<f64>,
    pub max_complexity: Option<u32>,
    pub complexity_distribution: ComplexityDistribution,
    pub average_maintainability: Option<f64>,
    pub maintainability_distribution: MaintainabilityDistribution,
    pub warnings: Vec<AggregateWarning>,
}

// -----------------------
// Model selectors
// -----------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ProjectClass {
    /// Small team, familiar environment, flexible requirements.
    Organic,
    /// Mixed experience, medium rigidity.
    Semidetached,
    /// Tight hardware, software and operational constraints.
    Embedded,
}

impl ProjectClass {
    pub const ALL: [ProjectClass; 3] = [
        ProjectClass::Organic,
        ProjectClass::Semidetached,
        ProjectClass::Embedded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectClass::Organic => "organic",
            ProjectClass::Semidetached => "semidetached",
            ProjectClass::Embedded => "embedded",
        }
    }
}

impl fmt::Display for ProjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Size-only formula.
    #[default]
    Basic,
    /// Size formula scaled by the effort adjustment factor.
    Intermediate,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Basic => "basic",
            Mode::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal rating scale shared by every cost driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    VeryLow,
    Low,
    #[default]
    Nominal,
    High,
    VeryHigh,
    ExtraHigh,
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::VeryLow,
        Rating::Low,
        Rating::Nominal,
        Rating::High,
        Rating::VeryHigh,
        Rating::ExtraHigh,
    ];

    /// Column of this rating in a multiplier table row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::VeryLow => "very_low",
            Rating::Low => "low",
            Rating::Nominal => "nominal",
            Rating::High => "high",
            Rating::VeryHigh => "very_high",
            Rating::ExtraHigh => "extra_high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::VeryLow => "Very Low",
            Rating::Low => "Low",
            Rating::Nominal => "Nominal",
            Rating::High => "High",
            Rating::VeryHigh => "Very High",
            Rating::ExtraHigh => "Extra High",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverCategory {
    Product,
    Computer,
    Personnel,
    Project,
}

/// The 15 Intermediate COCOMO cost drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CostDriver {
    Rely,
    Data,
    Cplx,
    Time,
    Stor,
    Virt,
    Turn,
    Acap,
    Aexp,
    Pcap,
    Vexp,
    Lexp,
    Modp,
    Tool,
    Sced,
}

impl CostDriver {
    pub const ALL: [CostDriver; 15] = [
        CostDriver::Rely,
        CostDriver::Data,
        CostDriver::Cplx,
        CostDriver::Time,
        CostDriver::Stor,
        CostDriver::Virt,
        CostDriver::Turn,
        CostDriver::Acap,
        CostDriver::Aexp,
        CostDriver::Pcap,
        CostDriver::Vexp,
        CostDriver::Lexp,
        CostDriver::Modp,
        CostDriver::Tool,
        CostDriver::Sced,
    ];

    /// Row of this driver in the multiplier table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        match self {
            CostDriver::Rely => "RELY",
            CostDriver::Data => "DATA",
            CostDriver::Cplx => "CPLX",
            CostDriver::Time => "TIME",
            CostDriver::Stor => "STOR",
            CostDriver::Virt => "VIRT",
            CostDriver::Turn => "TURN",
            CostDriver::Acap => "ACAP",
            CostDriver::Aexp => "AEXP",
            CostDriver::Pcap => "PCAP",
            CostDriver::Vexp => "VEXP",
            CostDriver::Lexp => "LEXP",
            CostDriver::Modp => "MODP",
            CostDriver::Tool => "TOOL",
            CostDriver::Sced => "SCED",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CostDriver::Rely => "Required software reliability",
            CostDriver::Data => "Size of application database",
            CostDriver::Cplx => "Complexity of the product",
            CostDriver::Time => "Run-time performance constraints",
            CostDriver::Stor => "Memory constraints",
            CostDriver::Virt => "Volatility of the virtual machine environment",
            CostDriver::Turn => "Required turnabout time",
            CostDriver::Acap => "Analyst capability",
            CostDriver::Aexp => "Applications experience",
            CostDriver::Pcap => "Software engineer capability",
            CostDriver::Vexp => "Virtual machine experience",
            CostDriver::Lexp => "Programming language experience",
            CostDriver::Modp => "Application of software engineering methods",
            CostDriver::Tool => "Use of software tools",
            CostDriver::Sced => "Required development schedule",
        }
    }

    pub fn category(self) -> DriverCategory {
        match self {
            CostDriver::Rely | CostDriver::Data | CostDriver::Cplx => DriverCategory::Product,
            CostDriver::Time | CostDriver::Stor | CostDriver::Virt | CostDriver::Turn => {
                DriverCategory::Computer
            }
            CostDriver::Acap
            | CostDriver::Aexp
            | CostDriver::Pcap
            | CostDriver::Vexp
            | CostDriver::Lexp => DriverCategory::Personnel,
            CostDriver::Modp | CostDriver::Tool | CostDriver::Sced => DriverCategory::Project,
        }
    }
}

impl fmt::Display for CostDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// -----------------------
// Estimate
// -----------------------

/// Class-level Basic COCOMO coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Rating and multiplier applied to one driver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverAssignment {
    pub rating: Rating,
    pub multiplier: f64,
}

/// Output of the model engine. Values are kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocomoEstimate {
    pub project_class: ProjectClass,
    pub mode: Mode,
    pub kloc: f64,
    pub coefficients: Coefficients,
    /// `a * KLOC^b`, before the adjustment factor.
    pub nominal_effort_pm: f64,
    pub eaf: f64,
    pub effort_pm: f64,
    pub schedule_months: f64,
    pub average_staffing: f64,
    pub productivity_kloc_per_pm: f64,
    /// Keyed by driver code. Empty in basic mode.
    pub drivers: BTreeMap<String, DriverAssignment>,
}

// -----------------------
// Report
// -----------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "effortmd".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Run metadata supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub codebase: String,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,
}

/// How the project class of a report was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassSource {
    /// Supplied by the caller.
    #[default]
    Explicit,
    /// Derived from size and complexity.
    Classified,
}

impl ClassSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassSource::Explicit => "explicit",
            ClassSource::Classified => "classified",
        }
    }
}

impl fmt::Display for ClassSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons behind the class and ratings a report was produced with.
///
/// `assumptions` is keyed by `project_class` or a driver code and holds one
/// sentence each. Only defaults the tool chose are listed; explicit choices
/// need no justification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimateRationale {
    pub class_source: ClassSource,
    pub complexity_score: u8,
    pub assumptions: BTreeMap<String, String>,
}

/// Stably keyed composition of summary, estimate and metadata.
///
/// Every value sits at the top level except the small composites (`tool`,
/// `coefficients`, the distributions, `drivers` and `assumptions`), which are
/// keyed maps one level deep. Downstream serializers and chart generators read
/// these keys directly and need no model-specific knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationReport {
    pub schema_version: u32,
    pub codebase: String,
    pub generated_at_ms: u128,
    pub tool: ToolInfo,

    pub total_loc: u64,
    pub effective_kloc: f64,
    pub file_count: usize,
    pub function_count: usize,
    pub average_complexity: Option<f64>,
    pub average_function_complexity: Option<f64>,
    pub max_complexity: Option<u32>,
    pub complexity_distribution: ComplexityDistribution,
    pub average_maintainability: Option<f64>,
    pub maintainability_distribution: MaintainabilityDistribution,

    pub project_class: ProjectClass,
    #[serde(default)]
    pub class_source: ClassSource,
    /// 0..=4, from typical complexity and file count.
    #[serde(default)]
    pub complexity_score: u8,
    pub mode: Mode,
    pub kloc: f64,
    pub coefficients: Coefficients,
    pub nominal_effort_pm: f64,
    pub eaf: f64,
    pub effort_pm: f64,
    pub schedule_months: f64,
    pub average_staffing: f64,
    pub productivity_kloc_per_pm: f64,
    pub drivers: BTreeMap<String, DriverAssignment>,
    #[serde(default)]
    pub assumptions: BTreeMap<String, String>,

    pub warnings: Vec<AggregateWarning>,
}

/// One line of a multi-codebase comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub codebase: String,
    pub project_class: ProjectClass,
    pub mode: Mode,
    pub kloc: f64,
    pub effort_pm: f64,
    pub schedule_months: f64,
    pub average_staffing: f64,
    pub eaf: f64,
    pub productivity_kloc_per_pm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Markdown (great for PR comments).
    #[default]
    Md,
    /// Pretty-printed JSON.
    Json,
    /// Tab-separated values.
    Tsv,
}
