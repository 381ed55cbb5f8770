use anyhow::{Context, Result};

use fdkeys_core::{parse_attribute_list, ClosureReport};

use crate::{load_input, parse_options, InputArgs};

pub fn run_closure(input: &InputArgs, attrs: &str, format: &str) -> Result<String> {
    let options = parse_options(input, None);
    let attributes = parse_attribute_list(attrs, &options)
        .with_context(|| format!("Invalid attribute list \"{attrs}\""))?;
    let loaded = load_input(input)?;
    let universe = loaded.parsed.dependencies.universe().clone();
    let report = ClosureReport::new(&loaded.parsed, attributes);

    match format {
        "json" => serde_json::to_string_pretty(&report).context("JSON serialization error"),
        _ => {
            for d in &report.diagnostics {
                eprintln!("{d}");
            }
            let verdict = if report.superkey { "is" } else { "is not" };
            let missing = universe.difference(&report.closure);
            let mut lines = vec![
                format!("Closure of {}: {}", report.attributes, report.closure),
                format!("{} {verdict} a superkey of {universe}", report.attributes),
            ];
            if !missing.is_empty() {
                lines.push(format!("Not determined: {missing}"));
            }
            Ok(lines.join("\n"))
        }
    }
}
