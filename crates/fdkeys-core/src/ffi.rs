//! FFI-oriented JSON API for cross-language bindings.
//!
//! All functions take string inputs and return JSON strings,
//! minimizing the FFI surface area.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalogs::{INLINE_SOURCE, REPORT_VERSION};
use crate::error::Result;
use crate::types::*;
use crate::{closure, parse_attribute_list, parse_fds, parse_source, search_keys};

// ---------------------------------------------------------------------------
// Options types (deserialized from JSON input)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonOptions {
    #[serde(flatten)]
    pub parse: ParseOptions,
    #[serde(default)]
    pub filename: String,
}

// ---------------------------------------------------------------------------
// Result types (serialized to JSON output)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Candidate key report shared by the JSON API and the CLI.
#[derive(Debug, Serialize)]
pub struct KeysReport {
    #[serde(rename = "reportVersion")]
    pub report_version: String,
    pub universe: AttributeSet,
    pub keys: BTreeSet<AttributeSet>,
    pub dependencies: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: SearchStats,
}

impl KeysReport {
    pub fn new(parsed: &ParsedFds) -> Self {
        let search = search_keys(&parsed.dependencies);
        Self {
            report_version: REPORT_VERSION.to_string(),
            universe: search.universe,
            keys: search.keys,
            dependencies: parsed.dependencies.iter().map(|fd| fd.to_string()).collect(),
            diagnostics: parsed.diagnostics.clone(),
            stats: search.stats,
        }
    }
}

/// Closure query result shared by the JSON API and the CLI.
#[derive(Debug, Serialize)]
pub struct ClosureReport {
    pub attributes: AttributeSet,
    pub closure: AttributeSet,
    pub superkey: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ClosureReport {
    pub fn new(parsed: &ParsedFds, attributes: AttributeSet) -> Self {
        let fds = &parsed.dependencies;
        let closure = closure(fds, &attributes);
        Self {
            superkey: closure.is_superset(fds.universe()),
            closure,
            attributes,
            diagnostics: parsed.diagnostics.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Find candidate keys and return the report as JSON.
///
/// Input: JSON array of dependency strings, e.g. `["A->B", "B,C->D"]`, plus options JSON
/// Output: JSON string with `{ success, data?: KeysReport, error? }`
pub fn find_keys_to_json(fds_json: &str, options_json: &str) -> String {
    to_json(keys_report(fds_json, options_json))
}

/// Compute the closure of a comma-separated attribute list and return it as JSON.
///
/// Input: JSON array of dependency strings, attribute list, options JSON
/// Output: JSON string with `{ success, data?: ClosureReport, error? }`
pub fn closure_to_json(fds_json: &str, attributes: &str, options_json: &str) -> String {
    to_json(closure_report(fds_json, attributes, options_json))
}

/// Parse a dependency source (one per line) and return its diagnostics as JSON.
///
/// Input: source text + options JSON
/// Output: JSON string with `{ success, data?: CheckReport, error? }`
pub fn check_to_json(content: &str, options_json: &str) -> String {
    to_json(check_report(content, options_json))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn read_options(options_json: &str) -> Result<JsonOptions> {
    if options_json.trim().is_empty() {
        return Ok(JsonOptions::default());
    }
    Ok(serde_json::from_str(options_json)?)
}

fn read_fds(fds_json: &str, options: &JsonOptions) -> Result<ParsedFds> {
    let raw: Vec<String> = serde_json::from_str(fds_json)?;
    Ok(parse_fds(&raw, &options.parse))
}

fn keys_report(fds_json: &str, options_json: &str) -> Result<KeysReport> {
    let options = read_options(options_json)?;
    let parsed = read_fds(fds_json, &options)?;
    Ok(KeysReport::new(&parsed))
}

fn closure_report(fds_json: &str, attributes: &str, options_json: &str) -> Result<ClosureReport> {
    let options = read_options(options_json)?;
    let parsed = read_fds(fds_json, &options)?;
    let attrs = parse_attribute_list(attributes, &options.parse)?;
    Ok(ClosureReport::new(&parsed, attrs))
}

fn check_report(content: &str, options_json: &str) -> Result<CheckReport> {
    let options = read_options(options_json)?;
    let filename = if options.filename.is_empty() {
        INLINE_SOURCE
    } else {
        &options.filename
    };
    let parsed = parse_source(content, filename, &options.parse);
    Ok(CheckReport {
        errors: parsed.errors().cloned().collect(),
        warnings: parsed.warnings().cloned().collect(),
    })
}

fn to_json<T: Serialize>(result: Result<T>) -> String {
    let ffi_result = match result {
        Ok(data) => FfiResult {
            success: true,
            data: Some(data),
            error: None,
        },
        Err(e) => FfiResult {
            success: false,
            data: None,
            error: Some(e.to_string()),
        },
    };
    serde_json::to_string(&ffi_result).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"JSON serialization error: {e}"}}"#)
    })
}
