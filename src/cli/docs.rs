//! Documentation content for the tokensmith CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Source,
    References,
    Types,
    Naming,
    Accessor,
    Config,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "source" | "input" => Some(Self::Source),
            "references" | "reference" | "refs" => Some(Self::References),
            "types" | "type" | "normalization" => Some(Self::Types),
            "naming" | "names" => Some(Self::Naming),
            "accessor" | "get" => Some(Self::Accessor),
            "config" | "configuration" => Some(Self::Config),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r##"TOKENSMITH DOCUMENTATION

tokensmith compiles a design-token export into a CSS variable sheet and a
nested lookup module. References between tokens are resolved, values are
normalized per token type, and every token gets a kebab-case variable name.

DOCUMENTATION CATEGORIES

  source            Shape of the token source document
  references        How {Alias} references are resolved
  types             Normalization rules per token type
  naming            How variable names and lookup paths are built
  accessor          Reading values back with 'tokensmith get'
  config            tokens.toml settings

QUICK REFERENCE

  tokensmith build                 Compile tokens/tokens.json into tokens/build/
  tokensmith check -i FILE         Compile without writing, print warnings
  tokensmith check --explain       Also show how each reference was resolved
  tokensmith get spacing.mode.1.space.l
"##
}

/// Get documentation for a specific category
pub fn get_doc_category(category: &str) -> Result<&'static str, CliError> {
    let cat = DocCategory::from_str(category)
        .ok_or_else(|| CliError::UnknownCategory(category.to_string()))?;

    Ok(match cat {
        DocCategory::Source => DOC_SOURCE,
        DocCategory::References => DOC_REFERENCES,
        DocCategory::Types => DOC_TYPES,
        DocCategory::Naming => DOC_NAMING,
        DocCategory::Accessor => DOC_ACCESSOR,
        DocCategory::Config => DOC_CONFIG,
    })
}

const DOC_SOURCE: &str = r##"SOURCE DOCUMENT

The input is one JSON object whose top-level keys are sections:

  {
    "Color/Light": { ... },
    "Spacing/Mode 1": { ... },
    "$metadata": { ... }
  }

Inside a section, any object with both a type and a value is a token:

  "L": { "type": "dimension", "value": "16" }
  "L": { "$type": "dimension", "$value": "16" }

Every other object is a group and is walked depth-first in document order.
Keys starting with $ are metadata and skipped at every level.
"##;

const DOC_REFERENCES: &str = r##"REFERENCES

A value containing {Alias} points at another token by a human label:

  "value": "{Brand.Primary 1}"
  "value": "rgba({Brand.Black}, 0.5)"

Each marker is resolved by the first strategy that succeeds:

  1. exact spelling      full dotted path, bare key, spacing/case variants
  2. canonical form      lowercase alphanumerics compared for equality
  3. chained reference   the alias names another reference; followed up to
                         compile.max_reference_depth hops, cycles stop
  4. containment         one canonical form contains the other (2+ chars)
  5. structural          key names walked through the source tree; a box
                         shadow may reference another box shadow token
  6. keyword fallback    color aliases mentioning error, success, ...
  7. neutral default     #000000, 0, 400, 1 or none, with a warning

Ties go to the token found first in document order.
"##;

const DOC_TYPES: &str = r##"TYPES

  color             hex or rgb()/rgba() kept; anything else becomes #000000
  boxShadow         layers become "<x>px <y>px <blur>px <spread>px <color>",
                    comma-joined; innerShadow layers get "inset"
  fontFamilies      wrapped in double quotes
  text              quoted when a group on its path mentions "family"
  dimension, spacing, sizing, borderRadius, borderWidth, fontSizes,
  lineHeights, letterSpacing, paragraphSpacing
                    unitless numbers get px ("16" -> 16px, "1.50" -> 1.5px);
                    values with a unit are kept
  fontWeights       Thin 100, ExtraLight 200, Light 300, Regular 400,
                    Medium 500, SemiBold 600, Bold 700, ExtraBold 800,
                    Black 900, Condensed 400; other names kept
  anything else     kept as written
"##;

const DOC_NAMING: &str = r##"NAMING

A variable name joins the section name, group keys and token key with
hyphens, then:

  - whitespace and characters outside [a-zA-Z0-9-] become hyphens
  - everything is lowercased
  - runs of hyphens collapse, leading/trailing hyphens are trimmed

  "Spacing/Mode 1" > "Space" > "L"   ->   --spacing-mode-1-space-l

The lookup module nests the same name split on hyphens:

  spacing.mode.1.space.l

When one name is a path prefix of another (--a-b and --a-b-c), the longer
one is kept and the shorter one is dropped from both outputs with a
warning. Of two identical names the first is kept.
"##;

const DOC_ACCESSOR: &str = r##"ACCESSOR

  tokensmith get <path> [--tokens tokens/build/tokens.js] [--fallback V]

Without a type flag the stored text decides the result:

  "\"Open Sans\""   ->  Open Sans     (quotes removed)
  "16px"            ->  16            (integer part)
  "#18181b"         ->  #18181b

  --string          quotes removed, units kept
  --number          quotes and px removed, parsed as a decimal

A missing path, a group, or an empty value gives the fallback, or an
empty string when there is none.
"##;

const DOC_CONFIG: &str = r##"CONFIG

tokensmith reads tokens.toml from the working directory, or the file given
with --config. Every key is optional.

  input = "tokens/tokens.json"
  out_dir = "tokens/build"
  css_file = "tokens.css"
  js_file = "tokens.js"
  selector = ":root"
  export_name = "tokens"

  [compile]
  max_reference_depth = 8      # 1 disables chained references

  [[compile.sections]]         # emit only these, in this order
  source = "Color/Light"
  name = "color-light"         # optional prefix override

  [[compile.fallbacks]]        # replaces the built-in keyword list
  keyword = "error"
  value = "#dc2626"

Logging goes to stderr; RUST_LOG overrides the -v level.
"##;
