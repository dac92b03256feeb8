//! Read path used by UI code against a built lookup tree.
//!
//! [`LookupTree::get_token`] keeps the loosely typed contract consumers were
//! written against: the shape of the stored text decides whether a number or
//! a string comes back. [`LookupTree::get_string`] and
//! [`LookupTree::get_number`] are the typed alternatives. All three share
//! [`LookupTree::lookup`] for walking the tree and never fail.
//!
//! # Examples
//!
//! ```
//! use tokensmith::{LookupTree, TokenValue};
//!
//! let mut tree = LookupTree::new();
//! tree.insert(&["space", "l"], "16px".to_string()).unwrap();
//! tree.insert(&["family", "body"], "\"Open Sans\"".to_string()).unwrap();
//!
//! assert_eq!(tree.get_token("space.l", None), TokenValue::Number(16));
//! assert_eq!(tree.get_token("family.body", None), TokenValue::Text("Open Sans".into()));
//! assert_eq!(tree.get_token("space.xxl", Some(TokenValue::Number(4))), TokenValue::Number(4));
//!
//! assert_eq!(tree.get_number("space.l", 0.0), 16.0);
//! assert_eq!(tree.get_string("space.l", ""), "16px");
//! ```

use rust_decimal::prelude::ToPrimitive;

use crate::{
    normalize::{PIXEL_UNIT, parse_number},
    tree::LookupTree,
};

/// A value handed back by [`LookupTree::get_token`]
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(i64),
    Text(String),
}

impl TokenValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            TokenValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            TokenValue::Number(_) => None,
        }
    }
}

impl Default for TokenValue {
    fn default() -> Self {
        TokenValue::Text(String::new())
    }
}

impl std::fmt::Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Text(s.to_string())
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Number(n)
    }
}

fn unquote(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
}

/// Integer prefix of a string: optional sign then digits, like `parseInt`
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let digits = value[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len() - sign_len);
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}

impl LookupTree {
    /// Fetch a token by dotted path.
    ///
    /// A missing path, a path ending at a group, or an empty value yields
    /// `fallback` (an empty string when there is none). A quoted value comes
    /// back unquoted; a value ending in `px` comes back as its integer part.
    pub fn get_token(&self, path: &str, fallback: Option<TokenValue>) -> TokenValue {
        let value = match self.lookup(path) {
            Some(v) if !v.is_empty() => v,
            _ => return fallback.unwrap_or_default(),
        };

        if let Some(inner) = unquote(value) {
            return TokenValue::Text(inner.to_string());
        }
        if let Some(number) = value.strip_suffix(PIXEL_UNIT) {
            if let Some(n) = leading_integer(number) {
                return TokenValue::Number(n);
            }
        }
        TokenValue::Text(value.to_string())
    }

    /// Fetch a token as text: quotes removed, units kept.
    pub fn get_string(&self, path: &str, fallback: &str) -> String {
        match self.lookup(path) {
            Some(v) if !v.is_empty() => unquote(v).unwrap_or(v).to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Fetch a token as a number: quotes and a `px` suffix removed. Anything
    /// that still is not a number yields `fallback`.
    pub fn get_number(&self, path: &str, fallback: f64) -> f64 {
        self.lookup(path)
            .map(|v| unquote(v).unwrap_or(v))
            .map(|v| v.strip_suffix(PIXEL_UNIT).unwrap_or(v))
            .and_then(parse_number)
            .and_then(|n| n.to_f64())
            .unwrap_or(fallback)
    }
}

#[test]
fn test_leading_integer() {
    assert_eq!(leading_integer("1.5"), Some(1));
    assert_eq!(leading_integer("-8"), Some(-8));
    assert_eq!(leading_integer("abc"), None);
    assert_eq!(leading_integer("-"), None);
}
