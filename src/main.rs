mod database;
mod error;
mod ingest;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;
use clap::{CommandFactory, Parser};
use anyhow::Result;
use tracing::{info, error};

use crate::error::ConfigError;
use crate::ingest::importer::{run_import, ImportSummary};
use crate::utils::config::{ImportConfig, RawOptions};

/// Bulk-load MD5 hash sets into a SQLite hash database.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file of hashes, one MD5 per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output or existing database
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not create the md5 index, use if adding another file afterwards
    #[arg(short, long)]
    noindex: bool,

    /// Show a progress bar while reading the input
    #[arg(long)]
    progress: bool,
}

impl From<Args> for RawOptions {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output: args.output,
            noindex: args.noindex,
            progress: args.progress,
        }
    }
}

fn print_usage() {
    println!("\n{}\n", Args::command().render_usage());
    println!("For help:");
    println!("{} -h or {} --help", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_NAME"));
}

fn run(raw: RawOptions) -> Result<ImportSummary> {
    let config = ImportConfig::resolve(raw)?;

    info!("Input: {}", config.input.display());
    info!("DB: {}", config.output.display());

    run_import(&config)
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ConfigError>() {
        Some(usage) => {
            error!("{}", usage);
            if usage.is_missing_argument() {
                print_usage();
            }
        }
        None => error!("Import failed: {:#}", err),
    }
}

/// Usage errors and fatal errors alike exit with status 1.
fn exit_status(outcome: &Result<ImportSummary>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let outcome = run(args.into());
    if let Err(e) = &outcome {
        report(e);
    }
    ExitCode::from(exit_status(&outcome))
}
