//! Compile a token source file and write both artifacts

use std::{fs, path::PathBuf};

use super::CliError;
use crate::{BuildConfig, Compiled, compile_str, render_css, render_module};

/// What a build wrote
#[derive(Debug)]
pub struct BuildSummary {
    pub css_path: PathBuf,
    pub js_path: PathBuf,
    pub compiled: Compiled,
}

/// Read `config.input`, compile it and write the variable sheet and lookup
/// module under `config.out_dir`. Nothing is written when the source cannot
/// be compiled.
pub fn execute_build(config: &BuildConfig) -> Result<BuildSummary, CliError> {
    let source =
        fs::read_to_string(&config.input).map_err(|e| CliError::Read(config.input.clone(), e))?;
    let compiled = compile_str(&source, &config.compile)?;

    let css = render_css(&compiled.sheet, &config.selector);
    let module = render_module(&compiled.tree, &config.export_name);

    fs::create_dir_all(&config.out_dir)?;
    let css_path = config.css_path();
    let js_path = config.js_path();
    fs::write(&css_path, css)?;
    fs::write(&js_path, module)?;

    tracing::info!(
        css = %css_path.display(),
        js = %js_path.display(),
        variables = compiled.sheet.len(),
        "wrote token artifacts"
    );

    Ok(BuildSummary {
        css_path,
        js_path,
        compiled,
    })
}
