//! Token source tree model.
//!
//! A source document is an arbitrarily nested JSON object. Any object level
//! carrying both a type and a value is a token node; every other object level
//! is a group. Keys starting with `$` are metadata and never traversed, except
//! for the `$type`/`$value` pair that DTCG-style exports use on token nodes.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use tokensmith::source::{TokenType, walk_section};
//!
//! let section = json!({
//!     "space": {
//!         "$description": "ignored",
//!         "l": { "type": "dimension", "value": "16" }
//!     }
//! });
//!
//! let mut seen = Vec::new();
//! walk_section(section.as_object().unwrap(), &mut |path, node| {
//!     seen.push((path.join("."), node.token_type.clone()));
//! });
//! assert_eq!(seen, vec![("space.l".to_string(), TokenType::Dimension)]);
//! ```

use serde_json::{Map, Value};

/// Prefix marking metadata keys.
pub const METADATA_PREFIX: char = '$';

/// Opening character of a reference marker such as `{Brand.Primary}`.
pub const REFERENCE_MARKER: char = '{';

/// Declared type of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    Color,
    Dimension,
    Spacing,
    Sizing,
    BorderRadius,
    BorderWidth,
    FontSizes,
    LineHeights,
    LetterSpacing,
    ParagraphSpacing,
    FontFamilies,
    FontWeights,
    BoxShadow,
    Opacity,
    Text,
    /// Any tag this crate has no dedicated rule for, kept verbatim
    Other(String),
}

impl TokenType {
    /// Parse a type tag as written in the source document
    pub fn parse(tag: &str) -> Self {
        match tag {
            "color" => Self::Color,
            "dimension" => Self::Dimension,
            "spacing" => Self::Spacing,
            "sizing" => Self::Sizing,
            "borderRadius" => Self::BorderRadius,
            "borderWidth" => Self::BorderWidth,
            "fontSizes" => Self::FontSizes,
            "lineHeights" => Self::LineHeights,
            "letterSpacing" => Self::LetterSpacing,
            "paragraphSpacing" => Self::ParagraphSpacing,
            "fontFamilies" => Self::FontFamilies,
            "fontWeights" => Self::FontWeights,
            "boxShadow" => Self::BoxShadow,
            "opacity" => Self::Opacity,
            "text" => Self::Text,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Spacing => "spacing",
            Self::Sizing => "sizing",
            Self::BorderRadius => "borderRadius",
            Self::BorderWidth => "borderWidth",
            Self::FontSizes => "fontSizes",
            Self::LineHeights => "lineHeights",
            Self::LetterSpacing => "letterSpacing",
            Self::ParagraphSpacing => "paragraphSpacing",
            Self::FontFamilies => "fontFamilies",
            Self::FontWeights => "fontWeights",
            Self::BoxShadow => "boxShadow",
            Self::Opacity => "opacity",
            Self::Text => "text",
            Self::Other(tag) => tag,
        }
    }

    /// Types whose unitless numbers get a pixel suffix
    pub fn takes_unit(&self) -> bool {
        matches!(
            self,
            Self::Dimension
                | Self::Spacing
                | Self::Sizing
                | Self::BorderRadius
                | Self::BorderWidth
                | Self::FontSizes
                | Self::LineHeights
                | Self::LetterSpacing
                | Self::ParagraphSpacing
        )
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf of the source tree: a declared type plus its raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenNode<'a> {
    pub token_type: TokenType,
    pub value: &'a Value,
}

impl<'a> TokenNode<'a> {
    /// Recognize a token node. Returns `None` for groups.
    pub fn from_object(obj: &'a Map<String, Value>) -> Option<Self> {
        let (tag, value) = match (obj.get("type"), obj.get("value")) {
            (Some(tag), Some(value)) => (tag, value),
            _ => (obj.get("$type")?, obj.get("$value")?),
        };
        let tag = tag.as_str()?;
        Some(TokenNode {
            token_type: TokenType::parse(tag),
            value,
        })
    }

    /// The value as a literal string, if it is a string or number without
    /// reference markers.
    pub fn literal(&self) -> Option<String> {
        literal_of(self.value)
    }

    /// The raw reference string, if the value contains a reference marker.
    pub fn reference(&self) -> Option<&'a str> {
        self.value.as_str().filter(|s| is_reference(s))
    }
}

/// True if a string value contains at least one reference marker
pub fn is_reference(s: &str) -> bool {
    s.contains(REFERENCE_MARKER)
}

/// True for keys that carry metadata rather than data
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

fn literal_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !is_reference(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Depth-first walk over one section, calling `visit` with the path from the
/// section root (raw keys) for every token node in document order.
pub fn walk_section<'a, F>(section: &'a Map<String, Value>, visit: &mut F)
where
    F: FnMut(&[&'a str], &TokenNode<'a>),
{
    let mut path = Vec::new();
    walk_group(section, &mut path, visit);
}

fn walk_group<'a, F>(group: &'a Map<String, Value>, path: &mut Vec<&'a str>, visit: &mut F)
where
    F: FnMut(&[&'a str], &TokenNode<'a>),
{
    for (key, value) in group {
        if is_metadata_key(key) {
            continue;
        }
        let Value::Object(obj) = value else {
            continue;
        };

        path.push(key.as_str());
        match TokenNode::from_object(obj) {
            Some(node) => visit(path.as_slice(), &node),
            None => walk_group(obj, path, visit),
        }
        path.pop();
    }
}

/// A top-level section of the source document selected for processing.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    /// Key as written in the source document
    pub source: &'a str,
    /// Name used as the first segment of variable names
    pub name: String,
    pub body: &'a Map<String, Value>,
}

/// All top-level sections in document order, skipping metadata keys and
/// non-object values.
pub fn sections(root: &Map<String, Value>) -> Vec<Section<'_>> {
    root.iter()
        .filter(|(key, _)| !is_metadata_key(key))
        .filter_map(|(key, value)| {
            value.as_object().map(|body| Section {
                source: key.as_str(),
                name: crate::naming::variable_name(&[key.as_str()]),
                body,
            })
        })
        .collect()
}

/// Find a token node by walking dotted-alias segments, comparing keys by
/// their canonical form. The first segment may match at any depth; the rest
/// must follow directly. Searches in document order.
pub fn find_structural<'a>(root: &'a Map<String, Value>, segments: &[String]) -> Option<TokenNode<'a>> {
    let (first, rest) = segments.split_first()?;
    search_from(root, first, rest)
}

fn search_from<'a>(group: &'a Map<String, Value>, first: &str, rest: &[String]) -> Option<TokenNode<'a>> {
    for (key, value) in group {
        if is_metadata_key(key) {
            continue;
        }
        let Value::Object(obj) = value else {
            continue;
        };

        if crate::index::canonical(key) == first {
            if let Some(node) = descend(obj, rest) {
                return Some(node);
            }
        }
        if TokenNode::from_object(obj).is_none() {
            if let Some(node) = search_from(obj, first, rest) {
                return Some(node);
            }
        }
    }
    None
}

fn descend<'a>(obj: &'a Map<String, Value>, rest: &[String]) -> Option<TokenNode<'a>> {
    let Some((next, tail)) = rest.split_first() else {
        return TokenNode::from_object(obj);
    };
    if TokenNode::from_object(obj).is_some() {
        return None;
    }
    obj.iter()
        .filter(|(key, _)| !is_metadata_key(key) && crate::index::canonical(key) == *next)
        .filter_map(|(_, value)| value.as_object())
        .find_map(|child| descend(child, tail))
}

#[test]
fn test_dtcg_keys() {
    let v = serde_json::json!({ "$type": "color", "$value": "#fff" });
    let node = TokenNode::from_object(v.as_object().unwrap()).unwrap();
    assert_eq!(node.token_type, TokenType::Color);
    assert_eq!(node.literal(), Some("#fff".to_string()));
}

#[test]
fn test_group_without_value_is_not_a_token() {
    let v = serde_json::json!({ "type": "color", "primary": { "type": "color", "value": "#000" } });
    assert!(TokenNode::from_object(v.as_object().unwrap()).is_none());
}
