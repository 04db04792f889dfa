//! Payload generator main executable

pub mod common;
pub mod err;
pub mod variant_processing;

use std::process::{ExitCode, Termination};

use clap::{Parser, Subcommand};
use console::{Emoji, Term};

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Metadata payload generation",
    long_about = "This tool generates metadata submission payloads for workflow outputs"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Payload for variant processing outputs.
    VariantProcessing(variant_processing::Args),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(common::tracing_level(&cli.common.verbose))
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    let result = tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::VariantProcessing(args) => {
                variant_processing::run(&cli.common, args)?;
            }
        }

        Ok::<(), anyhow::Error>(())
    });

    match result {
        Ok(()) => {
            // stderr is best effort at this point
            let _ = term.write_line(&format!("All done. Have a nice day!{}", Emoji(" 😃", "")));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = term.write_line(&format!("Error: {:#}", e));
            match e.downcast::<err::Error>() {
                Ok(e) => e.report(),
                Err(_) => ExitCode::FAILURE,
            }
        }
    }
}
