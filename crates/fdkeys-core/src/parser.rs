use std::collections::HashSet;

use tracing::debug;

use crate::catalogs::*;
use crate::error::{FdError, Result};
use crate::types::*;

// --- Parser state ---

struct ParserState<'a> {
    file: &'a str,
    options: &'a ParseOptions,
    dependencies: Vec<FunctionalDependency>,
    seen: HashSet<FunctionalDependency>,
    diagnostics: Vec<Diagnostic>,
}

impl ParserState<'_> {
    fn push(
        &mut self,
        code: &str,
        severity: DiagnosticSeverity,
        line: usize,
        col: usize,
        message: String,
    ) {
        self.diagnostics.push(Diagnostic {
            code: code.into(),
            severity,
            file: self.file.to_string(),
            line,
            col,
            message,
        });
    }

    fn finish(self) -> ParsedFds {
        debug!(
            file = self.file,
            dependencies = self.dependencies.len(),
            diagnostics = self.diagnostics.len(),
            "parsed dependencies"
        );
        ParsedFds {
            dependencies: FdSet::new(self.dependencies),
            diagnostics: self.diagnostics,
        }
    }
}

/// Parse a batch of raw dependency strings such as `"A->B"` or `"C,D->E"`.
///
/// Diagnostics point at `<input>`, with the 1-based entry index as the line.
pub fn parse_fds<I, S>(raw: I, options: &ParseOptions) -> ParsedFds
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = new_state(INLINE_SOURCE, options);
    for (i, entry) in raw.into_iter().enumerate() {
        parse_entry(entry.as_ref(), i + 1, &mut state);
    }
    state.finish()
}

/// Parse a dependency source file: one dependency per line, `#` comments and
/// blank lines ignored.
pub fn parse_source(content: &str, file: &str, options: &ParseOptions) -> ParsedFds {
    let mut state = new_state(file, options);
    for (i, raw_line) in content.split('\n').enumerate() {
        let raw = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let entry = strip_comment(raw);
        if entry.trim().is_empty() {
            continue;
        }
        parse_entry(entry, i + 1, &mut state);
    }
    state.finish()
}

/// Parse a comma-separated attribute list, e.g. the argument of a closure query.
pub fn parse_attribute_list(text: &str, options: &ParseOptions) -> Result<AttributeSet> {
    if text.contains(DETERMINATION_MARKER) {
        return Err(FdError::MarkerInAttribute(text.trim().to_string()));
    }
    let attrs: AttributeSet = tokens(text, 0, options)
        .filter(|(_, tok)| !tok.is_empty())
        .map(|(_, tok)| tok)
        .collect();
    if attrs.is_empty() {
        return Err(FdError::EmptyAttributeList);
    }
    Ok(attrs)
}

fn new_state<'a>(file: &'a str, options: &'a ParseOptions) -> ParserState<'a> {
    ParserState {
        file,
        options,
        dependencies: Vec::new(),
        seen: HashSet::new(),
        diagnostics: Vec::new(),
    }
}

/// Cut a full-line comment, or an inline one introduced by whitespace + `#`.
fn strip_comment(raw: &str) -> &str {
    if raw.trim_start().starts_with(COMMENT_MARKER) {
        return "";
    }
    let bytes = raw.as_bytes();
    for (i, ch) in raw.char_indices() {
        if ch == COMMENT_MARKER && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            return &raw[..i];
        }
    }
    raw
}

fn parse_entry(raw: &str, line: usize, state: &mut ParserState) {
    let Some(marker) = raw.find(DETERMINATION_MARKER) else {
        state.push(
            W_MISSING_MARKER,
            DiagnosticSeverity::Warning,
            line,
            1,
            format!("Entry \"{}\" has no \"->\" marker and was skipped", raw.trim()),
        );
        return;
    };

    let lhs_text = &raw[..marker];
    let rhs_offset = marker + DETERMINATION_MARKER.len();
    let rhs_text = &raw[rhs_offset..];

    if let Some(pos) = rhs_text.find(DETERMINATION_MARKER) {
        state.push(
            E_MARKER_IN_TOKEN,
            DiagnosticSeverity::Error,
            line,
            rhs_offset + pos + 1,
            format!(
                "Dependency \"{}\" has more than one \"->\" marker",
                raw.trim()
            ),
        );
        return;
    }

    let lhs = collect_side(lhs_text, 0, state.options);
    if lhs.attrs.is_empty() {
        state.push(
            E_EMPTY_LHS,
            DiagnosticSeverity::Error,
            line,
            1,
            format!(
                "Dependency \"{}\" has an empty left-hand side and was rejected",
                raw.trim()
            ),
        );
        return;
    }
    let rhs = collect_side(rhs_text, rhs_offset, state.options);
    if rhs.attrs.is_empty() {
        state.push(
            E_EMPTY_RHS,
            DiagnosticSeverity::Error,
            line,
            rhs_offset + 1,
            format!(
                "Dependency \"{}\" has an empty right-hand side and was rejected",
                raw.trim()
            ),
        );
        return;
    }

    // Empty-token warnings only for entries that survive both side checks.
    for col in lhs.empty_cols.into_iter().chain(rhs.empty_cols) {
        state.push(
            W_EMPTY_TOKEN,
            DiagnosticSeverity::Warning,
            line,
            col,
            "Empty attribute name was ignored".into(),
        );
    }

    let fd = FunctionalDependency::new(lhs.attrs, rhs.attrs);
    if !state.seen.insert(fd.clone()) {
        state.push(
            W_DUPLICATE,
            DiagnosticSeverity::Warning,
            line,
            1,
            format!("Duplicate dependency \"{fd}\""),
        );
        return;
    }
    state.dependencies.push(fd);
}

/// One side of a dependency plus the columns of any empty tokens on it.
struct Side {
    attrs: AttributeSet,
    empty_cols: Vec<usize>,
}

fn collect_side(text: &str, offset: usize, options: &ParseOptions) -> Side {
    let mut side = Side {
        attrs: AttributeSet::new(),
        empty_cols: Vec::new(),
    };
    for (col, tok) in tokens(text, offset, options) {
        if tok.is_empty() {
            side.empty_cols.push(col);
        } else {
            side.attrs.insert(tok);
        }
    }
    side
}

/// Split a side into `(1-based column, token)` pairs.
fn tokens<'t>(
    text: &'t str,
    offset: usize,
    options: &ParseOptions,
) -> Box<dyn Iterator<Item = (usize, String)> + 't> {
    if options.compact {
        return Box::new(
            text.char_indices()
                .filter(|(_, c)| *c != ATTRIBUTE_SEPARATOR && !c.is_whitespace())
                .map(move |(i, c)| (offset + i + 1, c.to_string())),
        );
    }

    let trim = options.trim;
    let mut start = 0;
    Box::new(text.split(ATTRIBUTE_SEPARATOR).map(move |tok| {
        let col = offset + start + 1;
        start += tok.len() + ATTRIBUTE_SEPARATOR.len_utf8();
        let tok = if trim { tok.trim() } else { tok };
        (col, tok.to_string())
    }))
}
