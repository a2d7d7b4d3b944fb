//! # effortmd-format
//!
//! Rendering for estimation reports, comparisons and the cost-driver table.
//! Numbers are rounded here and only here.

use anyhow::Result;
use effortmd_cocomo::tables;
use effortmd_math::{fmt_fixed, round_f64};
use effortmd_types::{ComparisonRow, CostDriver, EstimationReport, OutputFormat, Rating};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn render_report(report: &EstimationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Md => Ok(render_report_md(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Tsv => Ok(render_report_tsv(report)),
    }
}

pub fn render_comparison(rows: &[ComparisonRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Md => Ok(render_comparison_md(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Tsv => Ok(render_comparison_tsv(rows)),
    }
}

/// The multiplier table; `-` marks ratings the model does not define.
pub fn render_driver_table(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut rows = Vec::new();
            for driver in CostDriver::ALL {
                let multipliers: serde_json::Map<String, serde_json::Value> = Rating::ALL
                    .iter()
                    .map(|r| {
                        let value = tables::multiplier(driver, *r)
                            .map(serde_json::Value::from)
                            .unwrap_or(serde_json::Value::Null);
                        (r.as_str().to_string(), value)
                    })
                    .collect();
                rows.push(serde_json::json!({
                    "driver": driver.code(),
                    "description": driver.description(),
                    "category": driver.category(),
                    "multipliers": multipliers,
                }));
            }
            Ok(serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Md => {
            let mut out = String::new();
            out.push_str("|Driver|Description|VL|L|N|H|VH|XH|\n");
            out.push_str("|---|---|---:|---:|---:|---:|---:|---:|\n");
            for driver in CostDriver::ALL {
                out.push_str(&format!("|{}|{}|", driver.code(), driver.description()));
                out.push_str(&driver_cells(driver).join("|"));
                out.push_str("|\n");
            }
            Ok(out)
        }
        OutputFormat::Tsv => {
            let mut out = String::new();
            out.push_str("driver\tvery_low\tlow\tnominal\thigh\tvery_high\textra_high\n");
            for driver in CostDriver::ALL {
                out.push_str(driver.code());
                out.push('\t');
                out.push_str(&driver_cells(driver).join("\t"));
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn driver_cells(driver: CostDriver) -> Vec<String> {
    Rating::ALL
        .iter()
        .map(|r| match tables::multiplier(driver, *r) {
            Some(v) => fmt_fixed(v, 2),
            None => "-".to_string(),
        })
        .collect()
}

fn render_report_md(report: &EstimationReport) -> String {
    let mut out = String::new();
    out.push_str("# effortmd estimate\n\n");
    out.push_str(&format!("- Codebase: `{}`\n", md_inline(&report.codebase)));
    out.push_str(&format!(
        "- Generated: `{}`\n",
        format_timestamp(report.generated_at_ms)
    ));
    out.push_str(&format!(
        "- Tool: `{} {}`\n\n",
        report.tool.name, report.tool.version
    ));

    out.push_str("## Size\n\n");
    out.push_str("|Metric|Value|\n|---|---:|\n");
    out.push_str(&format!("|Files|{}|\n", report.file_count));
    out.push_str(&format!("|Functions|{}|\n", report.function_count));
    out.push_str(&format!("|Lines of code|{}|\n", report.total_loc));
    out.push_str(&format!("|KLOC|{}|\n\n", fmt_fixed(report.effective_kloc, 3)));

    out.push_str("## Complexity\n\n");
    out.push_str(&format!(
        "- Average per file: `{}`\n- Average per function: `{}`\n- Max: `{}`\n\n",
        fmt_opt(report.average_complexity, 2),
        fmt_opt(report.average_function_complexity, 2),
        report
            .max_complexity
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    ));
    let dist = &report.complexity_distribution;
    out.push_str("|Band|Files|\n|---|---:|\n");
    out.push_str(&format!("|low (<10)|{}|\n", dist.low));
    out.push_str(&format!("|medium (10-20)|{}|\n", dist.medium));
    out.push_str(&format!("|high (>20)|{}|\n", dist.high));
    out.push_str(&format!("|unknown|{}|\n\n", dist.unknown));

    out.push_str("## Maintainability\n\n");
    out.push_str(&format!(
        "- Average index: `{}`\n\n",
        fmt_opt(report.average_maintainability, 2)
    ));
    let mi = &report.maintainability_distribution;
    out.push_str("|Grade|Files|\n|---|---:|\n");
    out.push_str(&format!(
        "|A|{}|\n|B|{}|\n|C|{}|\n|unknown|{}|\n\n",
        mi.a, mi.b, mi.c, mi.unknown
    ));

    out.push_str("## COCOMO estimate\n\n");
    let coef = &report.coefficients;
    out.push_str(&format!(
        "- Class: `{}` ({}, complexity score {}/4)\n- Mode: `{}`\n- Coefficients: `a={} b={} c={} d={}`\n",
        report.project_class,
        report.class_source,
        report.complexity_score,
        report.mode,
        coef.a,
        coef.b,
        coef.c,
        coef.d
    ));
    out.push_str(&format!(
        "- Nominal effort (PM): `{}`\n- EAF: `{}`\n- Effort (PM): `{}`\n- Schedule (months): `{}`\n- Average staffing: `{}`\n- Productivity (KLOC/PM): `{}`\n\n",
        fmt_fixed(report.nominal_effort_pm, 2),
        fmt_fixed(report.eaf, 3),
        fmt_fixed(report.effort_pm, 2),
        fmt_fixed(report.schedule_months, 2),
        fmt_fixed(report.average_staffing, 2),
        fmt_fixed(report.productivity_kloc_per_pm, 3),
    ));

    if !report.drivers.is_empty() {
        out.push_str("## Cost drivers\n\n");
        out.push_str("|Driver|Rating|Multiplier|\n|---|---|---:|\n");
        for driver in CostDriver::ALL {
            if let Some(assignment) = report.drivers.get(driver.code()) {
                out.push_str(&format!(
                    "|{}|{}|{}|\n",
                    driver.code(),
                    assignment.rating,
                    fmt_fixed(assignment.multiplier, 2)
                ));
            }
        }
        out.push('\n');
    }

    if !report.assumptions.is_empty() {
        out.push_str("## Assumptions\n\n");
        // Class first, then drivers in table order.
        let class_note = report.assumptions.get("project_class");
        let driver_notes = CostDriver::ALL
            .iter()
            .filter_map(|d| report.assumptions.get(d.code()).map(|note| (d.code(), note)));
        for (topic, note) in class_note
            .map(|note| ("Class", note))
            .into_iter()
            .chain(driver_notes)
        {
            out.push_str(&format!("- **{topic}**: {}\n", md_inline(note)));
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str("## Warnings\n\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
        out.push('\n');
    }

    out
}

fn render_report_tsv(report: &EstimationReport) -> String {
    let rows: [(&str, String); 16] = [
        ("codebase", tsv_field(&report.codebase)),
        ("project_class", report.project_class.to_string()),
        ("class_source", report.class_source.to_string()),
        ("complexity_score", report.complexity_score.to_string()),
        ("mode", report.mode.to_string()),
        ("file_count", report.file_count.to_string()),
        ("total_loc", report.total_loc.to_string()),
        ("effective_kloc", tsv_num(report.effective_kloc)),
        ("average_complexity", tsv_opt(report.average_complexity)),
        ("average_maintainability", tsv_opt(report.average_maintainability)),
        ("nominal_effort_pm", tsv_num(report.nominal_effort_pm)),
        ("eaf", tsv_num(report.eaf)),
        ("effort_pm", tsv_num(report.effort_pm)),
        ("schedule_months", tsv_num(report.schedule_months)),
        ("average_staffing", tsv_num(report.average_staffing)),
        (
            "productivity_kloc_per_pm",
            tsv_num(report.productivity_kloc_per_pm),
        ),
    ];
    let mut out = String::from("key\tvalue\n");
    for (key, value) in rows {
        out.push_str(&format!("{key}\t{value}\n"));
    }
    out
}

fn render_comparison_md(rows: &[ComparisonRow]) -> String {
    let mut out = String::new();
    out.push_str("# effortmd comparison\n\n");
    out.push_str("|Codebase|Class|Mode|KLOC|Effort (PM)|Schedule (months)|Staff|EAF|KLOC/PM|\n");
    out.push_str("|---|---|---|---:|---:|---:|---:|---:|---:|\n");
    for row in rows {
        out.push_str(&format!(
            "|{}|{}|{}|{}|{}|{}|{}|{}|{}|\n",
            md_cell(&row.codebase),
            row.project_class,
            row.mode,
            fmt_fixed(row.kloc, 3),
            fmt_fixed(row.effort_pm, 2),
            fmt_fixed(row.schedule_months, 2),
            fmt_fixed(row.average_staffing, 2),
            fmt_fixed(row.eaf, 3),
            fmt_fixed(row.productivity_kloc_per_pm, 3),
        ));
    }
    out
}

fn render_comparison_tsv(rows: &[ComparisonRow]) -> String {
    let mut out = String::from(
        "codebase\tproject_class\tmode\tkloc\teffort_pm\tschedule_months\taverage_staffing\teaf\tproductivity_kloc_per_pm\n",
    );
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            tsv_field(&row.codebase),
            row.project_class,
            row.mode,
            tsv_num(row.kloc),
            tsv_num(row.effort_pm),
            tsv_num(row.schedule_months),
            tsv_num(row.average_staffing),
            tsv_num(row.eaf),
            tsv_num(row.productivity_kloc_per_pm),
        ));
    }
    out
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| fmt_fixed(v, decimals))
        .unwrap_or_else(|| "unknown".to_string())
}

/// TSV keeps six decimals so repeated runs diff cleanly.
fn tsv_num(value: f64) -> String {
    round_f64(value, 6).to_string()
}

fn tsv_opt(value: Option<f64>) -> String {
    value.map(tsv_num).unwrap_or_default()
}

/// Table cells: a bare `|` would end the cell early.
fn md_cell(text: &str) -> String {
    md_inline(text).replace('|', "\\|")
}

/// Line breaks would end a list item or table row.
fn md_inline(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// TSV has no quoting; separators inside a value become spaces.
fn tsv_field(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ")
}

/// Out-of-range values fall back to the raw millisecond count.
fn format_timestamp(ms: u128) -> String {
    i128::try_from(ms)
        .ok()
        .and_then(|ms| ms.checked_mul(1_000_000))
        .and_then(|ns| OffsetDateTime::from_unix_timestamp_nanos(ns).ok())
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{ms} ms"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_renders_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn timestamp_out_of_range_falls_back_to_millis() {
        // Overflows i128 nanoseconds.
        let huge = i128::MAX as u128 / 1_000;
        assert_eq!(format_timestamp(huge), format!("{huge} ms"));
        // Representable in nanoseconds but past the calendar range.
        assert_eq!(
            format_timestamp(u64::MAX as u128),
            format!("{} ms", u64::MAX)
        );
        // Not representable as i128 at all.
        assert_eq!(format_timestamp(u128::MAX), format!("{} ms", u128::MAX));
    }

    #[test]
    fn text_fields_are_escaped_per_format() {
        assert_eq!(md_cell("a|b\nc"), "a\\|b c");
        assert_eq!(md_inline("a|b\r\nc"), "a|b  c");
        assert_eq!(tsv_field("a\tb\nc"), "a b c");
        assert_eq!(tsv_field("plain"), "plain");
    }

    #[test]
    fn optional_values_render_unknown() {
        assert_eq!(fmt_opt(None, 2), "unknown");
        assert_eq!(fmt_opt(Some(6.5), 2), "6.50");
        assert_eq!(tsv_opt(None), "");
        assert_eq!(tsv_opt(Some(3.486745752)), "3.486746");
    }

    #[test]
    fn driver_table_marks_undefined_cells() {
        let md = render_driver_table(OutputFormat::Md).unwrap();
        assert!(md.contains("|RELY|Required software reliability|0.75|0.88|1.00|1.15|1.40|-|"));
        assert!(md.contains("|TIME|Run-time performance constraints|-|-|1.00|1.11|1.30|1.66|"));
        assert_eq!(md.lines().count(), 17);
    }
}
