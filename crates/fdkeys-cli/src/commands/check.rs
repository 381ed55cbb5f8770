use anyhow::{Context, Result};

use crate::{load_input, InputArgs};

/// Report parse diagnostics; returns the output and the number of errors.
pub fn run_check(input: &InputArgs, format: &str) -> Result<(String, usize)> {
    let loaded = load_input(input)?;
    let parsed = &loaded.parsed;

    let error_count = parsed.errors().count();
    let warning_count = parsed.warnings().count();
    let file_count = loaded.sources.len();
    let dependency_count = parsed.dependencies.len();

    if format == "json" {
        let output = serde_json::json!({
            "diagnostics": parsed.diagnostics,
            "summary": {
                "project": loaded.project,
                "errors": error_count,
                "warnings": warning_count,
                "files": file_count,
                "dependencies": dependency_count,
                "attributes": parsed.dependencies.universe().len(),
            }
        });
        let json = serde_json::to_string_pretty(&output).context("JSON serialization error")?;
        return Ok((json, error_count));
    }

    let mut lines: Vec<String> = Vec::new();
    if let Some(name) = &loaded.project {
        lines.push(format!("Project: {name}"));
    }
    lines.extend(parsed.diagnostics.iter().map(|d| d.to_string()));

    let error_word = if error_count == 1 { "error" } else { "errors" };
    let warning_word = if warning_count == 1 {
        "warning"
    } else {
        "warnings"
    };
    let dependency_word = if dependency_count == 1 {
        "dependency"
    } else {
        "dependencies"
    };
    let file_word = if file_count == 1 { "file" } else { "files" };
    lines.push(format!(
        "{error_count} {error_word}, {warning_count} {warning_word}, \
         {dependency_count} {dependency_word} in {file_count} {file_word}."
    ));

    Ok((lines.join("\n"), error_count))
}
