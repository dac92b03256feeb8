//! Rendering of the two build artifacts.
//!
//! - **Variable sheet** via [`render_css()`] - one `--name: value;` line per
//!   entry inside a single selector block
//! - **Lookup module** via [`render_module()`] - the lookup tree as
//!   pretty-printed JSON behind a named export
//!
//! Output is deterministic: entries and object keys appear in insertion
//! order, which is source traversal order. [`parse_module()`] reads a
//! generated module back into a [`LookupTree`].
//!
//! # Examples
//!
//! ```
//! use tokensmith::LookupTree;
//! use tokensmith::output::{parse_module, render_module};
//!
//! let mut tree = LookupTree::new();
//! tree.insert(&["space", "l"], "16px".to_string()).unwrap();
//!
//! let module = render_module(&tree, "tokens");
//! assert_eq!(
//!     module,
//!     "export const tokens = {\n  \"space\": {\n    \"l\": \"16px\"\n  }\n};\nexport default tokens;\n"
//! );
//! assert_eq!(parse_module(&module).unwrap(), tree);
//! ```

use serde_json::Value;

use crate::{
    sheet::TokenSheet,
    tree::{LookupTree, Node},
};

/// Errors that can occur while reading a generated module back
#[derive(Debug)]
pub enum ModuleError {
    /// No `export const <name> =` statement and no bare JSON object
    MissingExport,
    /// The exported structure is not valid JSON
    Json(serde_json::Error),
    /// The exported structure is valid JSON but not an object
    NotAnObject,
}

impl std::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleError::MissingExport => write!(f, "No exported token structure found"),
            ModuleError::Json(e) => write!(f, "Invalid token structure: {}", e),
            ModuleError::NotAnObject => write!(f, "Exported token structure is not an object"),
        }
    }
}

impl std::error::Error for ModuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModuleError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ModuleError {
    fn from(e: serde_json::Error) -> Self {
        ModuleError::Json(e)
    }
}

/// Render the variable sheet inside one `selector { ... }` block.
///
/// ```
/// use tokensmith::output::render_css;
/// use tokensmith::sheet::{SheetEntry, TokenSheet};
/// use tokensmith::source::TokenType;
///
/// let mut sheet = TokenSheet::new();
/// sheet.push(SheetEntry {
///     name: "spacing-mode-1-space-l".into(),
///     value: "16px".into(),
///     token_type: TokenType::Dimension,
/// });
/// assert_eq!(render_css(&sheet, ":root"), ":root {\n  --spacing-mode-1-space-l: 16px;\n}\n");
/// ```
pub fn render_css(sheet: &TokenSheet, selector: &str) -> String {
    let mut css = format!("{} {{\n", selector);
    for entry in sheet {
        css.push_str(&format!("  --{}: {};\n", entry.name, entry.value));
    }
    css.push_str("}\n");
    css
}

/// Render the lookup tree as a module exporting `export_name`.
///
/// The object is printed with serde_json's pretty printer (two-space indent).
pub fn render_module(tree: &LookupTree, export_name: &str) -> String {
    format!(
        "export const {name} = {body:#};\nexport default {name};\n",
        name = export_name,
        body = node_to_json(tree.root())
    )
}

/// Tree node as JSON; groups keep their child order
fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Leaf(s) => Value::String(s.clone()),
        Node::Group(children) => Value::Object(
            children
                .iter()
                .map(|(k, v)| (k.clone(), node_to_json(v)))
                .collect(),
        ),
    }
}

/// Read a generated module (or a bare JSON object) back into a tree.
///
/// Everything after the exported structure is ignored.
pub fn parse_module(source: &str) -> Result<LookupTree, ModuleError> {
    let trimmed = source.trim_start();
    let body = if trimmed.starts_with('{') {
        trimmed
    } else {
        let start = trimmed.find("export const").ok_or(ModuleError::MissingExport)?;
        let rest = &trimmed[start..];
        let eq = rest.find('=').ok_or(ModuleError::MissingExport)?;
        &rest[eq + 1..]
    };

    let value = serde_json::Deserializer::from_str(body)
        .into_iter::<Value>()
        .next()
        .ok_or(ModuleError::MissingExport)??;

    match value {
        Value::Object(_) => Ok(LookupTree::from_root(json_to_node(value))),
        _ => Err(ModuleError::NotAnObject),
    }
}

/// Convert parsed JSON into a tree node. Numbers and booleans become leaf
/// text; nulls and arrays are dropped.
fn json_to_node(value: Value) -> Node {
    match value {
        Value::Object(obj) => Node::Group(
            obj.into_iter()
                .filter_map(|(k, v)| match v {
                    Value::Null | Value::Array(_) => None,
                    v => Some((k, json_to_node(v))),
                })
                .collect(),
        ),
        Value::String(s) => Node::Leaf(s),
        other => Node::Leaf(other.to_string()),
    }
}
