//! Variable-name construction.
//!
//! Path segments are joined with hyphens after whitespace and every character
//! outside `[a-zA-Z0-9-]` become hyphens and everything is lowercased. Runs of
//! hyphens collapse and leading/trailing hyphens are trimmed, so splitting a
//! name on `-` never yields an empty segment.
//!
//! ```
//! use tokensmith::naming::{split_name, variable_name};
//!
//! let name = variable_name(&["Spacing/Mode 1", "Space", "L"]);
//! assert_eq!(name, "spacing-mode-1-space-l");
//! assert_eq!(split_name(&name), vec!["spacing", "mode", "1", "space", "l"]);
//! ```

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]").unwrap());
static HYPHEN_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Normalize one path segment, without collapsing hyphens
pub fn segment(part: &str) -> String {
    let spaced = WHITESPACE.replace_all(part, "-");
    DISALLOWED.replace_all(&spaced, "-").to_lowercase()
}

/// Build a variable name (without the leading `--`) from path segments
pub fn variable_name<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|part| segment(part.as_ref()))
        .collect::<Vec<_>>()
        .join("-");
    HYPHEN_RUN
        .replace_all(&joined, "-")
        .trim_matches('-')
        .to_string()
}

/// Split a variable name back into lookup-tree segments
pub fn split_name(name: &str) -> Vec<&str> {
    name.split('-').filter(|s| !s.is_empty()).collect()
}

#[test]
fn test_punctuation_and_case() {
    assert_eq!(variable_name(&["Primitive: Type/Mode 1", "Family", "Open Sans"]), "primitive-type-mode-1-family-open-sans");
}

#[test]
fn test_leading_and_trailing_hyphens() {
    assert_eq!(variable_name(&["  Color ", "(Brand)"]), "color-brand");
}

#[test]
fn test_non_ascii_becomes_hyphen() {
    assert_eq!(variable_name(&["größe", "xl"]), "gr-e-xl");
}
