//! CLI support for tokensmith
//!
//! Provides programmatic access to the build, check, get and docs commands
//! so build scripts can drive them without spawning the binary.

mod build;
mod check;
mod docs;
mod get;

pub use build::{BuildSummary, execute_build};
pub use check::{CheckOptions, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use get::{GetOptions, ReadAs, execute_get};

use std::{io, path::PathBuf};

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// The token source could not be compiled
    Compile(crate::CompileError),
    /// The configuration could not be loaded
    Config(crate::ConfigError),
    /// A generated module could not be read back
    Module(crate::ModuleError),
    /// A file could not be read
    Read(PathBuf, io::Error),
    /// IO error while writing artifacts
    Io(io::Error),
    /// No input provided
    NoInput,
    /// `--strict` was given and the compile produced warnings
    Warnings(usize),
    /// Unknown documentation category
    UnknownCategory(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Compile(e) => write!(f, "Compile error: {}", e),
            CliError::Config(e) => write!(f, "Config error: {}", e),
            CliError::Module(e) => write!(f, "Token module error: {}", e),
            CliError::Read(path, e) => write!(f, "Cannot read {}: {}", path.display(), e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::Warnings(n) => write!(f, "{} warning(s) reported in strict mode", n),
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'tokensmith docs' to see available categories.", c)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Compile(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Module(e) => Some(e),
            CliError::Read(_, e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::CompileError> for CliError {
    fn from(e: crate::CompileError) -> Self {
        CliError::Compile(e)
    }
}

impl From<crate::ConfigError> for CliError {
    fn from(e: crate::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<crate::ModuleError> for CliError {
    fn from(e: crate::ModuleError) -> Self {
        CliError::Module(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
