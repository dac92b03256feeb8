//! Build configuration.
//!
//! Loaded from a `tokens.toml` file when one is given or present in the
//! working directory; every field has a default so an empty file is valid.
//!
//! ```toml
//! input = "tokens/tokens.json"
//! out_dir = "tokens/build"
//!
//! [compile]
//! max_reference_depth = 8
//!
//! [[compile.sections]]
//! source = "Color/Light"
//! name = "color-light"
//!
//! [[compile.fallbacks]]
//! keyword = "error"
//! value = "#dc2626"
//! ```

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "tokens.toml";

/// Errors that can occur while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io(PathBuf, io::Error),
    /// The config file is not valid TOML for this schema
    Parse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Cannot read config {}: {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Invalid config {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
        }
    }
}

/// A top-level source section to emit, optionally renamed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Key of the section in the source document
    pub source: String,
    /// Prefix for its variable names; derived from `source` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Substitute color used when an unresolved alias mentions `keyword`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordFallback {
    pub keyword: String,
    pub value: String,
}

impl KeywordFallback {
    fn new(keyword: &str, value: &str) -> Self {
        KeywordFallback {
            keyword: keyword.to_string(),
            value: value.to_string(),
        }
    }
}

/// Options that shape a single compile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Sections to emit, in order. Empty means every section in document order.
    pub sections: Vec<SectionSpec>,
    /// Reference hops to follow before giving up; 1 disables chaining
    pub max_reference_depth: usize,
    /// Checked in order; the first keyword contained in the alias wins
    pub fallbacks: Vec<KeywordFallback>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            sections: Vec::new(),
            max_reference_depth: 8,
            fallbacks: vec![
                KeywordFallback::new("error", "#dc2626"),
                KeywordFallback::new("danger", "#dc2626"),
                KeywordFallback::new("success", "#16a34a"),
                KeywordFallback::new("warning", "#f59e0b"),
                KeywordFallback::new("info", "#2563eb"),
            ],
        }
    }
}

/// Full configuration of the `build` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Token source document
    pub input: PathBuf,
    /// Directory receiving both artifacts
    pub out_dir: PathBuf,
    pub css_file: String,
    pub js_file: String,
    /// Selector wrapping the variable sheet
    pub selector: String,
    /// Name of the exported lookup structure
    pub export_name: String,
    pub compile: CompileOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            input: PathBuf::from("tokens/tokens.json"),
            out_dir: PathBuf::from("tokens/build"),
            css_file: "tokens.css".to_string(),
            js_file: "tokens.js".to_string(),
            selector: ":root".to_string(),
            export_name: "tokens".to_string(),
            compile: CompileOptions::default(),
        }
    }
}

impl BuildConfig {
    /// Load an explicit config file, or `tokens.toml` from the working
    /// directory when it exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::parse(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn css_path(&self) -> PathBuf {
        self.out_dir.join(&self.css_file)
    }

    pub fn js_path(&self) -> PathBuf {
        self.out_dir.join(&self.js_file)
    }
}
