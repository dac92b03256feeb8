//! Reference resolution.
//!
//! A reference marker `{Alias}` is resolved by trying, in order:
//!
//! 1. the primitive index by exact spelling or canonical form,
//! 2. the reference index, following chains of references up to a hop limit,
//! 3. the primitive index by substring containment,
//! 4. a structural walk of the source tree by key names, which also renders
//!    box shadow tokens when a box shadow is asked for,
//! 5. keyword fallbacks (color tokens only),
//! 6. a neutral default for the token type.
//!
//! Resolution never fails; the last two steps exist so that a build never
//! stops on a dangling alias. Every marker resolved is recorded in the
//! [`Report`] together with the strategy that produced it.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::{
    config::CompileOptions,
    diagnostics::{Provenance, Report, ResolutionRecord, Warning},
    index::{PrimitiveIndex, ReferenceIndex, canonical},
    normalize::{self, FALLBACK_COLOR},
    source::{self, TokenType, is_reference},
};

static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

/// Both indexes, built in one pass over every section of the source tree.
#[derive(Debug, Clone, Default)]
pub struct Indexes {
    pub primitives: PrimitiveIndex,
    pub references: ReferenceIndex,
}

impl Indexes {
    /// Index every token node in every non-metadata section
    pub fn build(root: &Map<String, Value>) -> Self {
        let mut indexes = Indexes::default();
        for section in source::sections(root) {
            source::walk_section(section.body, &mut |path, node| {
                if let Some(literal) = node.literal() {
                    indexes.primitives.insert_path(path, literal);
                } else if let Some(reference) = node.reference() {
                    indexes.references.insert_path(path, reference.to_string());
                }
            });
        }
        tracing::debug!(
            primitives = indexes.primitives.len(),
            references = indexes.references.len(),
            "built alias indexes"
        );
        indexes
    }
}

/// Neutral value used when nothing matches an alias
pub fn default_for(token_type: &TokenType) -> &'static str {
    match token_type {
        TokenType::Color => FALLBACK_COLOR,
        TokenType::FontWeights => "400",
        TokenType::Opacity => "1",
        t if t.takes_unit() => "0",
        _ => "none",
    }
}

/// Resolves reference markers for one compile.
pub struct Resolver<'a> {
    root: &'a Map<String, Value>,
    indexes: &'a Indexes,
    options: &'a CompileOptions,
}

/// Outcome of resolving one alias
struct Resolved {
    value: String,
    provenance: Provenance,
    matched: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(root: &'a Map<String, Value>, indexes: &'a Indexes, options: &'a CompileOptions) -> Self {
        Resolver {
            root,
            indexes,
            options,
        }
    }

    /// Replace every reference marker in `raw` with its resolved value.
    ///
    /// `token` is the variable name used in records and warnings; `token_type`
    /// selects keyword fallbacks and the neutral default.
    pub fn resolve_str(&self, raw: &str, token: &str, token_type: &TokenType, report: &mut Report) -> String {
        let mut visited = Vec::new();
        self.substitute(raw, token, token_type, report, &mut visited)
    }

    fn substitute(
        &self,
        raw: &str,
        token: &str,
        token_type: &TokenType,
        report: &mut Report,
        visited: &mut Vec<String>,
    ) -> String {
        let replaced = MARKER.replace_all(raw, |caps: &Captures<'_>| {
            let alias = caps[1].trim();
            let resolved = self.resolve_alias(alias, token, token_type, report, visited);
            report.record(ResolutionRecord {
                token: token.to_string(),
                alias: alias.to_string(),
                value: resolved.value.clone(),
                provenance: resolved.provenance,
                matched: resolved.matched,
            });
            resolved.value
        });
        // A brace without its partner is not a marker but must not leak either
        replaced.replace(['{', '}'], "")
    }

    fn resolve_alias(
        &self,
        alias: &str,
        token: &str,
        token_type: &TokenType,
        report: &mut Report,
        visited: &mut Vec<String>,
    ) -> Resolved {
        let primitives = &self.indexes.primitives;
        if let Some(hit) = primitives.lookup_strict(alias) {
            return Resolved {
                value: hit.value.clone(),
                provenance: Provenance::Primitive(hit.kind),
                matched: Some(hit.key.to_string()),
            };
        }

        let mut chain_cut = false;
        if let Some(hit) = self.indexes.references.lookup_strict(alias) {
            match self.follow(alias, hit.value, token, token_type, report, visited) {
                Some(resolved) => {
                    return Resolved {
                        matched: Some(hit.key.to_string()),
                        ..resolved
                    };
                }
                None => chain_cut = true,
            }
        }

        if let Some(hit) = primitives.lookup_contained(alias) {
            return Resolved {
                value: hit.value.clone(),
                provenance: Provenance::Primitive(hit.kind),
                matched: Some(hit.key.to_string()),
            };
        }

        let segments: Vec<String> = alias.split('.').map(canonical).collect();
        if let Some(node) = source::find_structural(self.root, &segments) {
            if let Some(literal) = node.literal() {
                return Resolved {
                    value: literal,
                    provenance: Provenance::Structural,
                    matched: Some(alias.to_string()),
                };
            }
            if let Some(reference) = node.reference().filter(|_| !chain_cut) {
                if let Some(resolved) = self.follow(alias, reference, token, token_type, report, visited) {
                    return resolved;
                }
            }
            if *token_type == TokenType::BoxShadow && node.token_type == TokenType::BoxShadow {
                if let Some(value) = self.composite(node.value, token, report, visited) {
                    return Resolved {
                        value,
                        provenance: Provenance::Structural,
                        matched: Some(alias.to_string()),
                    };
                }
            }
        }

        if *token_type == TokenType::Color {
            let lowered = alias.to_lowercase();
            let keyword = self
                .options
                .fallbacks
                .iter()
                .find(|fallback| lowered.contains(&fallback.keyword.to_lowercase()));
            if let Some(fallback) = keyword {
                tracing::info!(token, alias, keyword = %fallback.keyword, "using keyword fallback");
                return Resolved {
                    value: fallback.value.clone(),
                    provenance: Provenance::Keyword(fallback.keyword.clone()),
                    matched: None,
                };
            }
        }

        let substitute = default_for(token_type).to_string();
        report.warn(Warning::UnresolvedReference {
            token: token.to_string(),
            alias: alias.to_string(),
            substitute: substitute.clone(),
        });
        Resolved {
            value: substitute,
            provenance: Provenance::Default,
            matched: None,
        }
    }

    /// Render a box shadow value, resolving references inside its layers as
    /// colors. `None` when the value holds no layers.
    pub fn shadow(&self, value: &Value, token: &str, report: &mut Report) -> Option<String> {
        self.composite(value, token, report, &mut Vec::new())
    }

    fn composite(&self, value: &Value, token: &str, report: &mut Report, visited: &mut Vec<String>) -> Option<String> {
        normalize::box_shadow(value, |field| {
            if is_reference(field) {
                self.substitute(field, token, &TokenType::Color, report, visited)
            } else {
                field.to_string()
            }
        })
    }

    /// Follow `alias`, whose token holds the reference string `target`, one
    /// hop further. `None` means the chain was cut and the caller should try
    /// its remaining strategies.
    fn follow(
        &self,
        alias: &str,
        target: &str,
        token: &str,
        token_type: &TokenType,
        report: &mut Report,
        visited: &mut Vec<String>,
    ) -> Option<Resolved> {
        let key = canonical(alias);
        if visited.contains(&key) {
            report.warn(Warning::ReferenceCycle {
                token: token.to_string(),
                alias: alias.to_string(),
            });
            return None;
        }
        if visited.len() + 1 >= self.options.max_reference_depth {
            report.warn(Warning::ReferenceTooDeep {
                token: token.to_string(),
                alias: alias.to_string(),
                limit: self.options.max_reference_depth,
            });
            return None;
        }

        visited.push(key);
        let value = self.substitute(target, token, token_type, report, visited);
        let hops = visited.len() + 1;
        visited.pop();

        Some(Resolved {
            value,
            provenance: Provenance::Chained { hops },
            matched: None,
        })
    }
}
