//! Recoverable problems and resolution provenance collected during a compile.
//!
//! Nothing here aborts a build. Every warning is also emitted through
//! `tracing` at the point where it is recorded.

use crate::index::MatchKind;

/// A per-token problem that was recovered with a substitute or a skip.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// No strategy matched; `substitute` was used instead
    UnresolvedReference {
        token: String,
        alias: String,
        substitute: String,
    },

    /// Following a reference chain led back to an alias already visited
    ReferenceCycle { token: String, alias: String },

    /// A reference chain exceeded the configured number of hops
    ReferenceTooDeep { token: String, alias: String, limit: usize },

    /// A color token did not look like a color after resolution
    InvalidColor { token: String, value: String },

    /// A unit-bearing token was neither a number nor a value with a unit
    NonNumericDimension { token: String, value: String },

    /// The token had no usable value and was dropped
    MissingValue { token: String },

    /// Two tokens produced the same variable name; the later one was dropped
    DuplicateName { name: String },

    /// A shorter name was a path prefix of a longer one and was dropped
    PathCollision { dropped: String, kept: String },

    /// The token could not be given a place in the lookup tree
    Unplaceable { name: String, reason: String },

    /// A configured section does not exist in the source document
    MissingSection { section: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnresolvedReference { token, alias, substitute } => write!(
                f,
                "{}: unresolved reference {{{}}}, using '{}'",
                token, alias, substitute
            ),
            Warning::ReferenceCycle { token, alias } => {
                write!(f, "{}: reference cycle through {{{}}}", token, alias)
            }
            Warning::ReferenceTooDeep { token, alias, limit } => write!(
                f,
                "{}: reference chain through {{{}}} is longer than {} hops",
                token, alias, limit
            ),
            Warning::InvalidColor { token, value } => {
                write!(f, "{}: '{}' is not a color, using #000000", token, value)
            }
            Warning::NonNumericDimension { token, value } => {
                write!(f, "{}: '{}' is not a number, left unchanged", token, value)
            }
            Warning::MissingValue { token } => write!(f, "{}: no value, token dropped", token),
            Warning::DuplicateName { name } => {
                write!(f, "--{}: defined more than once, keeping the first", name)
            }
            Warning::PathCollision { dropped, kept } => write!(
                f,
                "--{}: collides with the group of --{}, dropped",
                dropped, kept
            ),
            Warning::Unplaceable { name, reason } => write!(f, "{}: {}, dropped", name, reason),
            Warning::MissingSection { section } => {
                write!(f, "section '{}' not found in source", section)
            }
        }
    }
}

/// Which strategy produced a reference's value
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// Matched the primitive index
    Primitive(MatchKind),
    /// Followed `hops` references through the reference index
    Chained { hops: usize },
    /// Found by walking the source tree by key names
    Structural,
    /// Alias contained a fallback keyword
    Keyword(String),
    /// Nothing matched; neutral default for the token type
    Default,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Primitive(MatchKind::Exact) => write!(f, "exact"),
            Provenance::Primitive(MatchKind::Canonical) => write!(f, "canonical"),
            Provenance::Primitive(MatchKind::Substring) => write!(f, "substring"),
            Provenance::Chained { hops } => write!(f, "chained ({} hops)", hops),
            Provenance::Structural => write!(f, "structural"),
            Provenance::Keyword(keyword) => write!(f, "keyword '{}'", keyword),
            Provenance::Default => write!(f, "default"),
        }
    }
}

/// One resolved reference marker
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionRecord {
    /// Variable name of the token holding the reference
    pub token: String,
    pub alias: String,
    pub value: String,
    pub provenance: Provenance,
    /// Index spelling or source path that matched, when there is one
    pub matched: Option<String>,
}

/// Everything a compile had to say besides its artifacts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub warnings: Vec<Warning>,
    pub resolutions: Vec<ResolutionRecord>,
}

impl Report {
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn record(&mut self, record: ResolutionRecord) {
        tracing::debug!(
            token = %record.token,
            alias = %record.alias,
            via = %record.provenance,
            "resolved {{{}}} to {}",
            record.alias,
            record.value
        );
        self.resolutions.push(record);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
