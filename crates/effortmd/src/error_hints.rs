use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no such file or directory")
        || haystack.contains("cannot find the file")
    {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("no file metrics supplied") {
        push_hint(
            &mut out,
            "Check that the metrics provider emitted at least one file record.",
        );
    }

    if haystack.contains("positive, finite kloc") {
        push_hint(
            &mut out,
            "Every record reports zero lines of code; check how the provider counts logical lines.",
        );
    }

    if haystack.contains("unknown cost driver") || haystack.contains("is not defined for cost driver")
    {
        push_hint(
            &mut out,
            "Run `effortmd drivers` to list driver codes and the ratings each one defines.",
        );
    }

    if haystack.contains("expected name=rating") {
        push_hint(&mut out, "Pass drivers as `--driver CPLX=high`.");
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Driver files need a `[drivers]` table, e.g. `RELY = \"high\"`.",
        );
    }

    if haystack.contains("profile") && haystack.contains("not found") {
        push_hint(
            &mut out,
            "Profiles live under `profiles` in `<config dir>/effortmd/config.json` (or `EFFORTMD_CONFIG`).",
        );
    }

    if haystack.contains("invalid metrics input") {
        push_hint(
            &mut out,
            "Input must be a JSON array, a `{\"codebase\", \"files\"}` object, or JSONL with `path` and `lines_of_code` per record.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{format, suggestions};

    #[test]
    fn suggests_for_missing_path() {
        let err = anyhow!("No such file or directory (os error 2)")
            .context("Failed to read metrics input nope.json");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("input path exists")));
    }

    #[test]
    fn suggests_drivers_command_for_undefined_rating() {
        let err = anyhow!("rating 'Extra High' is not defined for cost driver RELY");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("effortmd drivers")));
    }

    #[test]
    fn suggests_for_empty_input() {
        let err = anyhow!("no file metrics supplied; an empty codebase has no defined cost");
        let hints = suggestions(&err);
        assert!(hints.iter().any(|h| h.contains("at least one file record")));
    }

    #[test]
    fn hints_are_not_duplicated() {
        let err = anyhow!("unknown cost driver 'FOO'")
            .context("rating 'x' is not defined for cost driver RELY");
        let hints = suggestions(&err);
        assert_eq!(
            hints
                .iter()
                .filter(|h| h.contains("effortmd drivers"))
                .count(),
            1
        );
    }

    #[test]
    fn format_includes_hints_section() {
        let err = anyhow!("no file metrics supplied");
        let rendered = format(&err);
        assert!(rendered.starts_with("Error:"));
        assert!(rendered.contains("Hints:"));
    }
}
