use anyhow::{Context, Result};

use fdkeys_core::{parse_fds, KeysReport, ParseOptions, ParsedFds, SAMPLE_DEPENDENCIES};

use crate::{load_input, InputArgs};

pub fn run_keys(input: &InputArgs, format: &str) -> Result<String> {
    let loaded = load_input(input)?;
    render(&loaded.parsed, format)
}

/// Run the key search on the built-in sample dependency set.
pub fn run_demo(compact: bool, format: &str) -> Result<String> {
    let options = ParseOptions {
        compact,
        ..ParseOptions::default()
    };
    let parsed = parse_fds(SAMPLE_DEPENDENCIES, &options);
    render(&parsed, format)
}

fn render(parsed: &ParsedFds, format: &str) -> Result<String> {
    let report = KeysReport::new(parsed);

    match format {
        "json" => serde_json::to_string_pretty(&report).context("JSON serialization error"),
        _ => {
            for d in &report.diagnostics {
                eprintln!("{d}");
            }
            Ok(render_human(&report))
        }
    }
}

/// One key per line, each attribute followed by a comma; `None` when empty.
pub fn render_human(report: &KeysReport) -> String {
    let mut lines = vec!["Candidate keys found:".to_string()];
    if report.keys.is_empty() {
        lines.push("None".into());
    } else {
        lines.extend(report.keys.iter().map(|k| k.to_report_line()));
    }
    lines.join("\n")
}
