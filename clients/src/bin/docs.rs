//! `generate-docs` — Generates HTML documentation from JSON schema files.
//!
//! **Outputs:**
//! - `<output-dir>/<schema-stem>/index.html` — Rendered page with a "View schema" link
//! - `<output-dir>/<schema-stem>/<schema-file>` — Copy of the input schema
//!
//! **Usage:**
//! ```
//! generate-docs [--output-dir <path>] [-v...] <schema>...
//! ```
//!
//! Exits with status 1 when no schema is given, a schema is missing, or any
//! schema fails to render.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser};
use schema_docs::{run, BuildOptions, SchemaRenderer, DEFAULT_OUTPUT_DIR};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a log filter directive.
const LOG_ENV: &str = "SCHEMA_DOCS_LOG";

/// Generate documentation from JSON schema files.
#[derive(Parser)]
#[command(
    name = "generate-docs",
    about = "Generate documentation from JSON schema files"
)]
struct Args {
    /// JSON schema files to process.
    schema_files: Vec<PathBuf>,

    /// Output directory for documentation.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Args> for BuildOptions {
    fn from(args: Args) -> Self {
        Self {
            schemas: args.schema_files,
            output_dir: args.output_dir,
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("{e}");
    }

    let options = BuildOptions::from(args);
    match run(&options, &SchemaRenderer) {
        Ok(report) => {
            tracing::info!(units = report.units.len(), "run complete");
            println!(
                "\nDocumentation generated successfully in {}",
                report.output_dir.display()
            );
        }
        Err(e) => {
            tracing::debug!(error = ?e, "documentation run failed");
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `SCHEMA_DOCS_LOG` wins over `-v`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
