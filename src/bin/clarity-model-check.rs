//! Change-driven model checking for Clarity contracts
//!
//! Usage: clarity-model-check check --base <rev> --head <rev> [files...]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "clarity-model-check")]
#[command(about = "Change-driven formal verification for Clarity contracts", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every function that changed between two revisions
    Check {
        /// Base revision (e.g. a commit or branch)
        #[arg(long)]
        base: String,

        /// Head revision
        #[arg(long)]
        head: String,

        /// Contracts to compare (default: all contracts in the configured
        /// directory)
        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,

        /// Extra checker flags appended after the baseline set
        #[arg(long)]
        flags: Option<String>,

        /// Directory searched for contracts when no files are given
        #[arg(long)]
        contracts_dir: Option<PathBuf>,

        /// Exclusion pattern (repeatable); matching files are not verified
        #[arg(long, action = clap::ArgAction::Append)]
        exclude: Vec<String>,
    },

    /// Show which functions changed between two revisions
    Diff {
        #[arg(long)]
        base: String,

        #[arg(long)]
        head: String,

        files: Vec<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List the function definitions of a contract on disk
    Functions {
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug)]
enum OutputFormat {
    Human,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            _ => Err(format!("Unknown format: {}. Expected: human, json, sarif", s)),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check {
            base,
            head,
            files,
            format,
            flags,
            contracts_dir,
            exclude,
        } => cli::check::handle_check(cli::check::CheckArgs {
            config: cli.config,
            base,
            head,
            files,
            format,
            flags,
            contracts_dir,
            exclude,
        }),
        Commands::Diff {
            base,
            head,
            files,
            format,
        } => cli::check::handle_diff(cli.config, base, head, files, format),
        Commands::Functions { file } => cli::check::handle_functions(&file),
    };

    std::process::exit(exit_code);
}
