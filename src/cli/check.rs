//! Compile a token source without writing anything

use super::CliError;
use crate::{CompileOptions, Compiled, compile_str};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Token source JSON
    pub input: Option<String>,
    pub compile: CompileOptions,
    /// Fail when the compile reported any warning
    pub strict: bool,
}

/// Execute a check: compile in memory and hand back the artifacts and report
pub fn execute_check(options: &CheckOptions) -> Result<Compiled, CliError> {
    let source = options.input.as_ref().ok_or(CliError::NoInput)?;
    let compiled = compile_str(source, &options.compile)?;

    if options.strict && compiled.report.has_warnings() {
        return Err(CliError::Warnings(compiled.report.warnings.len()));
    }
    Ok(compiled)
}
