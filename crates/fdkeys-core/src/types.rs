use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// An opaque, case-sensitive attribute name.
pub type Attribute = String;

/// An unordered set of unique attributes.
///
/// Backed by a `BTreeSet` so iteration, `Display` and JSON output are always
/// in sorted order, and sets themselves are totally ordered (usable as members
/// of another `BTreeSet`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(BTreeSet<Attribute>);

impl AttributeSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.0.contains(attr)
    }

    /// Insert an attribute, returning `true` if it was not already present.
    pub fn insert(&mut self, attr: impl Into<Attribute>) -> bool {
        self.0.insert(attr.into())
    }

    pub fn is_subset(&self, other: &AttributeSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_superset(&self, other: &AttributeSet) -> bool {
        self.0.is_superset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }

    /// Attributes of `self` that are not in `other`.
    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Render in the trailing-separator report form, e.g. `A,D,`.
    pub fn to_report_line(&self) -> String {
        self.0.iter().map(|a| format!("{a},")).collect()
    }
}

impl<S: Into<Attribute>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<Attribute>> Extend<S> for AttributeSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for AttributeSet {
    type Item = Attribute;
    type IntoIter = std::collections::btree_set::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::collections::btree_set::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{attr}")?;
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// Functional dependencies
// ---------------------------------------------------------------------------

/// `lhs -> rhs`: the attributes of `lhs` functionally determine those of `rhs`.
///
/// The parser never produces an empty `lhs`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FunctionalDependency {
    pub lhs: AttributeSet,
    pub rhs: AttributeSet,
}

impl FunctionalDependency {
    pub fn new(lhs: AttributeSet, rhs: AttributeSet) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |s: &AttributeSet| s.iter().cloned().collect::<Vec<_>>().join(",");
        write!(f, "{}->{}", join(&self.lhs), join(&self.rhs))
    }
}

/// An immutable, deduplicated collection of dependencies together with its
/// attribute universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FdSet {
    dependencies: BTreeSet<FunctionalDependency>,
    universe: AttributeSet,
}

impl FdSet {
    pub fn new<I: IntoIterator<Item = FunctionalDependency>>(dependencies: I) -> Self {
        let dependencies: BTreeSet<FunctionalDependency> = dependencies.into_iter().collect();
        let mut universe = AttributeSet::new();
        for fd in &dependencies {
            universe.extend(fd.lhs.iter().cloned());
            universe.extend(fd.rhs.iter().cloned());
        }
        Self {
            dependencies,
            universe,
        }
    }

    /// Every attribute mentioned on either side of any dependency.
    pub fn universe(&self) -> &AttributeSet {
        &self.universe
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionalDependency> {
        self.dependencies.iter()
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

impl<'a> IntoIterator for &'a FdSet {
    type Item = &'a FunctionalDependency;
    type IntoIter = std::collections::btree_set::Iter<'a, FunctionalDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.iter()
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: DiagnosticSeverity,
    pub file: String,
    pub line: usize,
    pub col: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        write!(
            f,
            "{}:{}:{} {}[{}]: {}",
            self.file, self.line, self.col, severity, self.code, self.message
        )
    }
}

// ---------------------------------------------------------------------------
// Parser input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Trim surrounding whitespace from every attribute token.
    #[serde(default = "default_trim")]
    pub trim: bool,
    /// Textbook notation: every non-separator character is its own attribute,
    /// so `CD->E` reads as `C,D->E`.
    #[serde(default)]
    pub compact: bool,
}

fn default_trim() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim: true,
            compact: false,
        }
    }
}

/// Result of parsing a batch of raw dependency strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedFds {
    pub dependencies: FdSet,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedFds {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Combine several parse results (e.g. one per file) into one collection.
    /// Dependencies repeated across parts collapse silently.
    pub fn merge<I: IntoIterator<Item = ParsedFds>>(parts: I) -> ParsedFds {
        let mut dependencies = Vec::new();
        let mut diagnostics = Vec::new();
        for part in parts {
            dependencies.extend(part.dependencies.dependencies);
            diagnostics.extend(part.diagnostics);
        }
        ParsedFds {
            dependencies: FdSet::new(dependencies),
            diagnostics,
        }
    }
}

// ---------------------------------------------------------------------------
// Key search output
// ---------------------------------------------------------------------------

/// Candidate keys plus counters describing how the search went.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeySearch {
    pub universe: AttributeSet,
    pub keys: BTreeSet<AttributeSet>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Subsets visited across all sizes.
    pub subsets_examined: u64,
    /// Subsets whose closure was actually computed.
    pub closures_computed: u64,
    /// Subsets skipped because they already contain an accepted key.
    pub supersets_pruned: u64,
}
