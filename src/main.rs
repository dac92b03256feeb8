use clap::{Parser as ClapParser, Subcommand};
use std::{
    io::{self, Read},
    path::PathBuf,
};
use tokensmith::{
    BuildConfig,
    cli::{self, CheckOptions, CliError, GetOptions, ReadAs},
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "tokensmith")]
#[command(about = "tokensmith - compile design tokens into CSS variables and a lookup module")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to tokens.toml (defaults to ./tokens.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the token source and write both artifacts
    Build {
        /// Token source JSON (overrides the config file)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Compile without writing and report warnings
    Check {
        /// Token source JSON file (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Exit with an error when any warning was reported
        #[arg(long)]
        strict: bool,

        /// Show how every reference was resolved
        #[arg(long)]
        explain: bool,
    },

    /// Read one token from a generated lookup module
    Get {
        /// Dotted path, e.g. spacing.mode.1.space.l
        path: String,

        /// Generated module (defaults to the configured build output)
        #[arg(short, long)]
        tokens: Option<PathBuf>,

        /// Value returned when the path does not resolve
        #[arg(short, long)]
        fallback: Option<String>,

        /// Read as a number (quotes and px removed)
        #[arg(long, conflicts_with = "string")]
        number: bool,

        /// Read as a string (quotes removed, units kept)
        #[arg(long)]
        string: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'tokensmith docs' to list categories)
        category: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "tokensmith=warn",
        1 => "tokensmith=info",
        _ => "tokensmith=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build { input, out_dir } => run_build(cli.config, input, out_dir),
        Commands::Check {
            input,
            strict,
            explain,
        } => run_check(cli.config, input, strict, explain),
        Commands::Get {
            path,
            tokens,
            fallback,
            number,
            string,
        } => run_get(cli.config, path, tokens, fallback, number, string),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_build(
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut config = BuildConfig::load(config.as_deref())?;
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(out_dir) = out_dir {
        config.out_dir = out_dir;
    }

    let summary = cli::execute_build(&config)?;
    let sheet = &summary.compiled.sheet;

    println!("Generated {} CSS variables", sheet.len());
    println!("  {}", summary.css_path.display());
    println!("  {}", summary.js_path.display());
    for entry in sheet.iter().take(10) {
        println!("    --{}: {};", entry.name, entry.value);
    }
    if sheet.len() > 10 {
        println!("    ... and {} more", sheet.len() - 10);
    }

    let warnings = summary.compiled.report.warnings.len();
    if warnings > 0 {
        println!("{} warning(s), run 'tokensmith check' for details", warnings);
    }
    Ok(())
}

fn run_check(
    config: Option<PathBuf>,
    input: Option<PathBuf>,
    strict: bool,
    explain: bool,
) -> Result<(), CliError> {
    let config = BuildConfig::load(config.as_deref())?;
    let input = match input {
        Some(path) => {
            Some(std::fs::read_to_string(&path).map_err(|e| CliError::Read(path.clone(), e))?)
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        input,
        compile: config.compile,
        strict: false,
    };
    let compiled = cli::execute_check(&options)?;

    if explain {
        for record in &compiled.report.resolutions {
            println!(
                "--{}: {{{}}} -> {} ({}{})",
                record.token,
                record.alias,
                record.value,
                record.provenance,
                record
                    .matched
                    .as_deref()
                    .map(|m| format!(", matched '{}'", m))
                    .unwrap_or_default()
            );
        }
    }
    for warning in &compiled.report.warnings {
        println!("warning: {}", warning);
    }
    println!(
        "{} variables, {} warning(s)",
        compiled.sheet.len(),
        compiled.report.warnings.len()
    );

    if strict && compiled.report.has_warnings() {
        return Err(CliError::Warnings(compiled.report.warnings.len()));
    }
    Ok(())
}

fn run_get(
    config: Option<PathBuf>,
    path: String,
    tokens: Option<PathBuf>,
    fallback: Option<String>,
    number: bool,
    string: bool,
) -> Result<(), CliError> {
    let tokens = match tokens {
        Some(tokens) => tokens,
        None => BuildConfig::load(config.as_deref())?.js_path(),
    };
    let read_as = if number {
        ReadAs::Number
    } else if string {
        ReadAs::String
    } else {
        ReadAs::Auto
    };

    let options = GetOptions {
        path,
        tokens,
        fallback,
        read_as,
    };
    println!("{}", cli::execute_get(&options)?);
    Ok(())
}
