/// Separator between the determinant and the dependent side of a dependency.
pub const DETERMINATION_MARKER: &str = "->";

/// Separator between attribute tokens on either side of a dependency.
pub const ATTRIBUTE_SEPARATOR: char = ',';

/// Line comment marker in dependency source files.
pub const COMMENT_MARKER: char = '#';

/// Placeholder file name for diagnostics on in-memory input.
pub const INLINE_SOURCE: &str = "<input>";

/// Built-in sample used by `fdkeys demo`.
pub const SAMPLE_DEPENDENCIES: &[&str] = &["A->B", "B->C", "CD->E"];

// Diagnostic codes
pub const W_MISSING_MARKER: &str = "FD-W001";
pub const W_EMPTY_TOKEN: &str = "FD-W002";
pub const W_DUPLICATE: &str = "FD-W003";
pub const E_EMPTY_LHS: &str = "FD-E001";
pub const E_EMPTY_RHS: &str = "FD-E002";
pub const E_MARKER_IN_TOKEN: &str = "FD-E003";

/// Report format version emitted in JSON output.
pub const REPORT_VERSION: &str = "1.0";
