//! Type-directed value normalization.
//!
//! Runs after reference resolution, so every input here is a literal.

use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::{
    diagnostics::{Report, Warning},
    source::TokenType,
};

/// Substitute for anything that should have been a color
pub const FALLBACK_COLOR: &str = "#000000";

/// Unit appended to unitless dimensions
pub const PIXEL_UNIT: &str = "px";

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});
static RGB_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^rgba?\(.*\)$").unwrap());
static WITH_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(\d+\.?\d*|\.\d+)\s*([a-zA-Z]+|%)$").unwrap());

/// The token being normalized, for naming warnings and path-based rules
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    /// Variable name, used in warnings
    pub name: &'a str,
    /// Section name followed by the raw keys down to the token
    pub path: &'a [&'a str],
    pub token_type: &'a TokenType,
}

/// Normalize a resolved scalar value according to the token type.
pub fn normalize(ctx: &TokenContext<'_>, value: String, report: &mut Report) -> String {
    match ctx.token_type {
        TokenType::Color => {
            if is_color(&value) {
                value
            } else {
                report.warn(Warning::InvalidColor {
                    token: ctx.name.to_string(),
                    value,
                });
                FALLBACK_COLOR.to_string()
            }
        }
        TokenType::FontFamilies => quote(value),
        TokenType::Text if names_family(ctx.path) => quote(value),
        TokenType::FontWeights => font_weight(&value).map(str::to_string).unwrap_or(value),
        t if t.takes_unit() => match with_unit(&value) {
            Some(v) => v,
            None => {
                report.warn(Warning::NonNumericDimension {
                    token: ctx.name.to_string(),
                    value: value.clone(),
                });
                value
            }
        },
        _ => value,
    }
}

/// Hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or `rgb(...)`/`rgba(...)`
pub fn is_color(value: &str) -> bool {
    let value = value.trim();
    HEX_COLOR.is_match(value) || RGB_COLOR.is_match(value)
}

/// Wrap in double quotes unless already quoted
pub fn quote(value: String) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value
    } else {
        format!("\"{}\"", value)
    }
}

fn names_family(path: &[&str]) -> bool {
    let groups = path.split_last().map(|(_, groups)| groups).unwrap_or_default();
    groups.iter().any(|part| part.to_lowercase().contains("family"))
}

/// Numeric weight for a named font weight
pub fn font_weight(name: &str) -> Option<&'static str> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    let weight = match key.as_str() {
        "thin" | "hairline" => "100",
        "extralight" | "ultralight" => "200",
        "light" => "300",
        "regular" | "normal" | "condensed" => "400",
        "medium" => "500",
        "semibold" | "demibold" => "600",
        "bold" => "700",
        "extrabold" | "ultrabold" => "800",
        "black" | "heavy" => "900",
        _ => return None,
    };
    Some(weight)
}

/// Parse a plain decimal number, tolerating surrounding whitespace
pub fn parse_number(value: &str) -> Option<Decimal> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Append the pixel unit to a unitless number. Values that already carry a
/// unit are returned trimmed; anything else is `None`.
pub fn with_unit(value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(n) = parse_number(value) {
        return Some(format!("{}{}", n.normalize(), PIXEL_UNIT));
    }
    WITH_UNIT.is_match(value).then(|| value.to_string())
}

/// Render a box shadow value (one layer object or an array of them) as a
/// comma-joined composite. `resolve` turns any string field that contains a
/// reference marker into a literal.
pub fn box_shadow<F>(value: &Value, mut resolve: F) -> Option<String>
where
    F: FnMut(&str) -> String,
{
    let layers: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => return None,
    };

    let rendered: Vec<String> = layers
        .into_iter()
        .filter_map(Value::as_object)
        .map(|layer| {
            let mut field = |key: &str| -> Option<String> {
                match layer.get(key)? {
                    Value::String(s) => Some(resolve(s.as_str())),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                }
            };
            let length = |v: Option<String>| {
                let v = v.unwrap_or_else(|| "0".to_string());
                with_unit(&v).unwrap_or(v)
            };

            let x = length(field("x"));
            let y = length(field("y"));
            let blur = length(field("blur"));
            let spread = length(field("spread"));
            let color = field("color").unwrap_or_else(|| FALLBACK_COLOR.to_string());
            let inset = matches!(layer.get("type").and_then(Value::as_str), Some("innerShadow"));

            format!(
                "{}{} {} {} {} {}",
                if inset { "inset " } else { "" },
                x,
                y,
                blur,
                spread,
                color
            )
        })
        .collect();

    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(", "))
    }
}
