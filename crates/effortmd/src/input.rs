//! Metrics input loading.
//!
//! Accepted shapes:
//! * a JSON array of records
//! * a JSON object `{ "codebase": "...", "files": [...] }`
//! * JSONL, one record per line

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use effortmd_types::RawFileMetric;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MetricsDocument {
    #[serde(default)]
    codebase: Option<String>,
    files: Vec<RawFileMetric>,
}

#[derive(Debug, Clone)]
pub(crate) struct MetricsInput {
    /// Name declared inside the document, if any.
    pub codebase: Option<String>,
    /// File stem of the input path; `None` for stdin.
    pub stem: Option<String>,
    pub files: Vec<RawFileMetric>,
}

impl MetricsInput {
    /// Declared name, else the file stem, else `stdin`.
    pub(crate) fn codebase_name(&self) -> String {
        self.codebase
            .clone()
            .or_else(|| self.stem.clone())
            .unwrap_or_else(|| "stdin".to_string())
    }
}

/// Load metrics from `path`; `-` reads stdin.
pub(crate) fn load(path: &Path) -> Result<MetricsInput> {
    let (text, stem) = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read metrics input from stdin")?;
        (text, None)
    } else {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metrics input {}", path.display()))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        (text, stem)
    };

    let (codebase, files) =
        parse(&text).with_context(|| format!("Invalid metrics input {}", path.display()))?;
    debug!(path = %path.display(), records = files.len(), "loaded metrics input");
    Ok(MetricsInput {
        codebase,
        stem,
        files,
    })
}

pub(crate) fn parse(text: &str) -> Result<(Option<String>, Vec<RawFileMetric>)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok((None, Vec::new()));
    }

    // A single JSON value is an array, a document, or a one-record JSONL file.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if value.is_array() {
            let files = serde_json::from_value(value).context("Failed to parse metrics array")?;
            return Ok((None, files));
        }
        if value.get("files").is_some() {
            let doc: MetricsDocument =
                serde_json::from_value(value).context("Failed to parse metrics document")?;
            return Ok((doc.codebase, doc.files));
        }
        if value.is_object() {
            let record = serde_json::from_value(value).context("Failed to parse line 1")?;
            return Ok((None, vec![record]));
        }
        bail!(
            "Unrecognized metrics input; expected a JSON array, a {{codebase, files}} object, or JSONL"
        );
    }

    parse_jsonl(text).map(|files| (None, files))
}

fn parse_jsonl(text: &str) -> Result<Vec<RawFileMetric>> {
    let mut files = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: RawFileMetric =
            serde_json::from_str(line).with_context(|| format!("Failed to parse line {}", i + 1))?;
        files.push(record);
    }
    Ok(files)
}
