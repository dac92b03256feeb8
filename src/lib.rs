pub mod accessor;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod index;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod resolve;
pub mod sheet;
pub mod source;
pub mod tree;

pub use accessor::TokenValue;
pub use compiler::{CompileError, Compiled, compile, compile_str};
pub use config::{BuildConfig, CompileOptions, ConfigError};
pub use diagnostics::{Provenance, Report, Warning};
pub use output::{ModuleError, parse_module, render_css, render_module};
pub use sheet::{SheetEntry, TokenSheet};
pub use source::TokenType;
pub use tree::LookupTree;
