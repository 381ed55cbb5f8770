//! fdkeys WASM bindings.
//!
//! Provides JavaScript-callable functions via wasm-bindgen.
//! All functions take string inputs and return JSON strings.

use fdkeys_core::{check_to_json, closure_to_json, find_keys_to_json};
use wasm_bindgen::prelude::*;

/// Find every candidate key of a dependency set.
///
/// @param fds_json - JSON array of dependency strings, e.g. `["A->B", "B,C->D"]`
/// @param options_json - JSON options `{ trim?: boolean, compact?: boolean }`
/// @returns JSON string with `{ success: boolean, data?: KeysReport, error?: string }`
#[wasm_bindgen(js_name = "findKeys")]
pub fn wasm_find_keys(fds_json: &str, options_json: &str) -> String {
    find_keys_to_json(fds_json, options_json)
}

/// Compute the closure of a comma-separated attribute list.
///
/// @param fds_json - JSON array of dependency strings
/// @param attributes - attribute list, e.g. `"A,D"`
/// @param options_json - JSON options `{ trim?: boolean, compact?: boolean }`
/// @returns JSON string with `{ success: boolean, data?: ClosureReport, error?: string }`
#[wasm_bindgen(js_name = "closure")]
pub fn wasm_closure(fds_json: &str, attributes: &str, options_json: &str) -> String {
    closure_to_json(fds_json, attributes, options_json)
}

/// Check a dependency source text and return its diagnostics.
///
/// @param content - one dependency per line, `#` comments allowed
/// @param options_json - JSON options `{ trim?: boolean, compact?: boolean, filename?: string }`
/// @returns JSON string with `{ success: boolean, data?: CheckReport, error?: string }`
#[wasm_bindgen(js_name = "check")]
pub fn wasm_check(content: &str, options_json: &str) -> String {
    check_to_json(content, options_json)
}
