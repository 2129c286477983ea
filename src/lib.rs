//! Paramgate: typed parameter extraction for experiment logs.
//!
//! Experiment-tracking platforms return run configuration as a flat
//! JSON object with no type guarantees: numbers show up as strings,
//! booleans as `"yes"`, enums as names in any case or integer codes.
//! Paramgate resolves that raw mapping into typed, validated,
//! immutable parameter sets, tracking which fields fell back to their
//! declared defaults.
//!
//! # Modules
//!
//! - [`resolve`]: the resolution engine (coercion, enums, ranges,
//!   default tracking)
//! - [`params`]: concrete parameter sets (hyper, augmentation, export,
//!   template-driven)
//! - [`report`]: display/serialization of resolved sets
//! - [`error`]: error types for paramgate operations

pub mod error;
pub mod params;
pub mod report;
pub mod resolve;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

pub use error::ParamgateError;

use params::{AugmentationParameters, ExportParameters, HyperParameters, TemplateParams};
use report::ResolutionReport;

/// The paramgate CLI application.
#[derive(Parser)]
#[command(name = "paramgate")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a parameter set from a log-data JSON file.
    Resolve(ResolveArgs),
}

/// Arguments for the resolve subcommand.
#[derive(clap::Args)]
struct ResolveArgs {
    /// Log-data JSON file to resolve against.
    input: PathBuf,

    /// Parameter set to resolve ('hyper', 'augmentation', or 'export').
    #[arg(long, default_value = "hyper")]
    set: String,

    /// Resolve a template JSON object instead of a named set.
    #[arg(long, conflicts_with = "set")]
    template: Option<PathBuf>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Fail when any parameter fell back to its default.
    #[arg(long)]
    strict: bool,
}

/// Run the paramgate CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ParamgateError> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve(args)) => run_resolve(args),
        None => {
            // No subcommand: print a short banner and exit successfully
            println!("paramgate {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Typed parameter extraction for experiment logs.");
            println!();
            println!("Run 'paramgate --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the resolve subcommand.
fn run_resolve(args: ResolveArgs) -> Result<(), ParamgateError> {
    let log_data = read_json(&args.input)?;

    let report = match &args.template {
        Some(template_path) => {
            let template = read_json(template_path)?;
            ResolutionReport::from_set(&TemplateParams::from_log_data(&template, &log_data)?)
        }
        None => match args.set.as_str() {
            "hyper" | "hyperparameters" => {
                ResolutionReport::from_set(&HyperParameters::from_log_data(&log_data)?)
            }
            "augmentation" | "augment" => {
                ResolutionReport::from_set(&AugmentationParameters::from_log_data(&log_data)?)
            }
            "export" => ResolutionReport::from_set(&ExportParameters::from_log_data(&log_data)?),
            other => return Err(ParamgateError::UnknownParamSet(other.to_string())),
        },
    };

    match args.output.as_str() {
        "json" => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(ParamgateError::ReportSerialize)?;
            println!("{rendered}");
        }
        _ => {
            print!("{report}");
        }
    }

    if args.strict && report.defaulted_count() > 0 {
        return Err(ParamgateError::StrictDefaults {
            defaulted: report.defaulted_count(),
        });
    }

    Ok(())
}

/// Reads and parses a JSON file, keeping the path in the error.
fn read_json(path: &Path) -> Result<Value, ParamgateError> {
    let file = File::open(path).map_err(ParamgateError::Io)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| ParamgateError::LogDataParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Installs the fmt subscriber for warn-level resolution events.
///
/// The library itself never installs a subscriber; only the CLI does.
/// Repeated initialization (e.g. under tests) is a no-op.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}
