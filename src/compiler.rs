use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::{
    config::CompileOptions,
    diagnostics::{Report, Warning},
    naming::{split_name, variable_name},
    normalize::{self, TokenContext},
    resolve::{Indexes, Resolver},
    sheet::{SheetEntry, TokenSheet},
    source::{self, Section, TokenNode, TokenType, is_reference},
    tree::LookupTree,
};

/// Errors that stop a compile. Everything else is recovered per token.
#[derive(Debug)]
pub enum CompileError {
    /// The source document is not valid JSON
    Json(serde_json::Error),

    /// The source document parsed, but its root is not an object
    NotAnObject(&'static str),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Json(e) => write!(f, "Cannot parse token source: {}", e),
            CompileError::NotAnObject(kind) => {
                write!(f, "Token source must be an object of sections, found {}", kind)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Json(e) => Some(e),
            CompileError::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(e: serde_json::Error) -> Self {
        CompileError::Json(e)
    }
}

/// Returns a human-readable type name for a JSON value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Both build artifacts plus everything that was recovered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub sheet: TokenSheet,
    pub tree: LookupTree,
    pub report: Report,
}

/// Parse and compile a token source document.
///
/// # Examples
///
/// ```
/// use tokensmith::{CompileOptions, compile_str};
///
/// let source = r##"{
///     "Spacing/Mode 1": { "Space": { "L": { "type": "dimension", "value": "16" } } },
///     "Color/Light": {
///         "Brand": { "Primary 1": { "type": "color", "value": "#18181b" } },
///         "Text": { "Header": { "type": "color", "value": "{Brand.Primary 1}" } }
///     }
/// }"##;
///
/// let compiled = compile_str(source, &CompileOptions::default()).unwrap();
/// assert_eq!(compiled.sheet.get("spacing-mode-1-space-l"), Some("16px"));
/// assert_eq!(compiled.tree.lookup("color.light.text.header"), Some("#18181b"));
/// ```
pub fn compile_str(source: &str, options: &CompileOptions) -> Result<Compiled, CompileError> {
    let document: Value = serde_json::from_str(source)?;
    compile(&document, options)
}

/// Compile a parsed token source document.
///
/// Builds the alias indexes over every section, then resolves, normalizes
/// and names every token of the emitted sections in document order. Name
/// clashes are settled before anything is placed: the first of two equal
/// names wins, and a name that is a path prefix of a longer one gives way to
/// the longer one. Only a non-object root is an error.
pub fn compile(document: &Value, options: &CompileOptions) -> Result<Compiled, CompileError> {
    let root = document
        .as_object()
        .ok_or_else(|| CompileError::NotAnObject(type_name(document)))?;

    let mut report = Report::default();
    let indexes = Indexes::build(root);
    let resolver = Resolver::new(root, &indexes, options);

    let mut candidates = Vec::new();
    for section in select_sections(root, options, &mut report) {
        tracing::info!(section = section.source, prefix = %section.name, "processing section");
        source::walk_section(section.body, &mut |path, node| {
            let parts: Vec<&str> = std::iter::once(section.name.as_str())
                .chain(path.iter().copied())
                .collect();
            if let Some(entry) = compile_token(&parts, node, &resolver, &mut report) {
                candidates.push(entry);
            }
        });
    }

    let (sheet, tree) = assemble(candidates, &mut report);
    tracing::info!(
        variables = sheet.len(),
        warnings = report.warnings.len(),
        "compiled design tokens"
    );

    Ok(Compiled {
        sheet,
        tree,
        report,
    })
}

fn select_sections<'a>(
    root: &'a Map<String, Value>,
    options: &CompileOptions,
    report: &mut Report,
) -> Vec<Section<'a>> {
    let all = source::sections(root);
    if options.sections.is_empty() {
        return all;
    }

    options
        .sections
        .iter()
        .filter_map(|wanted| match all.iter().find(|s| s.source == wanted.source) {
            Some(section) => Some(Section {
                name: wanted
                    .name
                    .as_deref()
                    .map(|n| variable_name(&[n]))
                    .unwrap_or_else(|| section.name.clone()),
                ..section.clone()
            }),
            None => {
                report.warn(Warning::MissingSection {
                    section: wanted.source.clone(),
                });
                None
            }
        })
        .collect()
}

/// Resolve and normalize one token. `parts` is the section name followed by
/// the raw keys.
fn compile_token(
    parts: &[&str],
    node: &TokenNode<'_>,
    resolver: &Resolver<'_>,
    report: &mut Report,
) -> Option<SheetEntry> {
    let name = variable_name(parts);
    if name.is_empty() {
        report.warn(Warning::Unplaceable {
            name: parts.join("."),
            reason: "name is empty after normalization".to_string(),
        });
        return None;
    }
    let token_type = &node.token_type;

    let raw = match node.value {
        Value::String(s) if is_reference(s) => Some(resolver.resolve_str(s, &name, token_type, report)),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) if *token_type == TokenType::BoxShadow => {
            if let Some(shadow) = resolver.shadow(node.value, &name, report) {
                return Some(SheetEntry {
                    name,
                    value: shadow,
                    token_type: token_type.clone(),
                });
            }
            None
        }
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    };

    let Some(raw) = raw else {
        report.warn(Warning::MissingValue { token: name });
        return None;
    };

    let ctx = TokenContext {
        name: &name,
        path: parts,
        token_type,
    };
    let value = normalize::normalize(&ctx, raw, report);
    Some(SheetEntry {
        name,
        value,
        token_type: token_type.clone(),
    })
}

/// Settle name clashes, then build both artifacts from the survivors.
fn assemble(candidates: Vec<SheetEntry>, report: &mut Report) -> (TokenSheet, LookupTree) {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(candidates.len());
    for entry in candidates {
        if seen.insert(entry.name.clone()) {
            unique.push(entry);
        } else {
            report.warn(Warning::DuplicateName { name: entry.name });
        }
    }

    // Every proper prefix of a name is a group; remember the first name
    // that needs it.
    let mut groups: HashMap<String, &str> = HashMap::new();
    for entry in &unique {
        let segments = split_name(&entry.name);
        for end in 1..segments.len() {
            groups
                .entry(segments[..end].join("-"))
                .or_insert(entry.name.as_str());
        }
    }

    let mut dropped = HashSet::new();
    for entry in &unique {
        if let Some(kept) = groups.get(entry.name.as_str()) {
            report.warn(Warning::PathCollision {
                dropped: entry.name.clone(),
                kept: kept.to_string(),
            });
            dropped.insert(entry.name.clone());
        }
    }

    let mut sheet = TokenSheet::new();
    let mut tree = LookupTree::new();
    for entry in unique {
        if dropped.contains(&entry.name) {
            continue;
        }
        match tree.insert(&split_name(&entry.name), entry.value.clone()) {
            Ok(()) => sheet.push(entry),
            Err(e) => report.warn(Warning::Unplaceable {
                name: entry.name,
                reason: e.to_string(),
            }),
        }
    }
    (sheet, tree)
}
