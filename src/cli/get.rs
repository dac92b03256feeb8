//! Read one token from a generated lookup module

use std::{fs, path::PathBuf};

use super::CliError;
use crate::{TokenValue, parse_module};

/// How the value should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadAs {
    /// Number or text depending on the stored value
    #[default]
    Auto,
    Number,
    String,
}

/// Options for the get command
#[derive(Debug, Clone)]
pub struct GetOptions {
    /// Dotted path such as `spacing.mode.1.space.l`
    pub path: String,
    /// Generated module (or JSON object) holding the lookup tree
    pub tokens: PathBuf,
    pub fallback: Option<String>,
    pub read_as: ReadAs,
}

/// Look up a token and render it as text
pub fn execute_get(options: &GetOptions) -> Result<String, CliError> {
    let source =
        fs::read_to_string(&options.tokens).map_err(|e| CliError::Read(options.tokens.clone(), e))?;
    let tree = parse_module(&source)?;
    let path = options.path.as_str();

    let output = match options.read_as {
        ReadAs::Auto => {
            let fallback = options.fallback.as_deref().map(|f| match f.parse::<i64>() {
                Ok(n) => TokenValue::Number(n),
                Err(_) => TokenValue::from(f),
            });
            tree.get_token(path, fallback).to_string()
        }
        ReadAs::String => tree.get_string(path, options.fallback.as_deref().unwrap_or_default()),
        ReadAs::Number => {
            let fallback = options
                .fallback
                .as_deref()
                .and_then(|f| f.parse::<f64>().ok())
                .unwrap_or(0.0);
            tree.get_number(path, fallback).to_string()
        }
    };
    Ok(output)
}
