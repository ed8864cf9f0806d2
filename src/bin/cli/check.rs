//! Check/diff/functions command handlers
//!
//! Assembles the pipeline from its process-backed collaborators, applies CLI
//! overrides on top of the configuration file, and maps the run status to an
//! exit code.

use super::{format, git::GitFetcher, tools};
use crate::OutputFormat;
use anyhow::Context;
use clarity_model_check::config::Options;
use clarity_model_check::parser::parse_functions;
use clarity_model_check::pipeline::{Pipeline, RunStatus};
use clarity_model_check::sarif;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "clarity-model-check.toml";

pub struct CheckArgs {
    pub config: Option<PathBuf>,
    pub base: String,
    pub head: String,
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub flags: Option<String>,
    pub contracts_dir: Option<PathBuf>,
    pub exclude: Vec<String>,
}

/// Load options from the given file, the default file if present, or
/// defaults.
fn load_options(config: Option<&PathBuf>) -> anyhow::Result<Options> {
    match config {
        Some(path) => Options::load(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Options::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_FILE))
        }
        None => Ok(Options::default()),
    }
}

pub fn handle_check(args: CheckArgs) -> i32 {
    let mut options = match load_options(args.config.as_ref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return 1;
        }
    };

    if let Some(flags) = args.flags {
        options.checker_flags = flags;
    }
    if let Some(dir) = args.contracts_dir {
        options.contracts_dir = dir;
    }
    options.exclude.extend(args.exclude);

    let repo_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let fetcher = GitFetcher::new(repo_root);
    let provider = tools::CommandAstProvider::new(options.ast_command.clone());
    let checker = tools::CommandChecker::new(options.checker_command.clone());

    let pipeline = Pipeline::new(&fetcher, &provider, &checker, &options);
    let outcome = match pipeline.run(&args.base, &args.head, &args.files) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error running verification: {}", e);
            return 1;
        }
    };

    match args.format {
        OutputFormat::Human => print!("{}", format::format_outcome_human(&outcome)),
        OutputFormat::Json => println!("{}", format::format_outcome_json(&outcome)),
        OutputFormat::Sarif => {
            match sarif::to_json(
                &outcome.findings,
                "clarity-model-check",
                env!("CARGO_PKG_VERSION"),
            ) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing SARIF report: {}", e);
                    return 1;
                }
            }
        }
    }

    match outcome.status {
        RunStatus::Failure => 1,
        RunStatus::Success | RunStatus::NoChanges => 0,
    }
}

pub fn handle_diff(
    config: Option<PathBuf>,
    base: String,
    head: String,
    files: Vec<PathBuf>,
    format: OutputFormat,
) -> i32 {
    let options = match load_options(config.as_ref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return 1;
        }
    };

    let files = if files.is_empty() {
        match options.discover_contracts() {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error discovering contracts: {}", e);
                return 1;
            }
        }
    } else {
        files
    };

    let repo_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let fetcher = GitFetcher::new(repo_root);
    let provider = tools::CommandAstProvider::new(options.ast_command.clone());
    let checker = tools::CommandChecker::new(options.checker_command.clone());

    let pipeline = Pipeline::new(&fetcher, &provider, &checker, &options);
    let changes = match pipeline.collect_changes(&base, &head, &files) {
        Ok(changes) => changes,
        Err(e) => {
            eprintln!("Error comparing revisions: {}", e);
            return 1;
        }
    };

    match format {
        OutputFormat::Json => println!("{}", format::format_changes_json(&changes)),
        _ => print!("{}", format::format_changes_human(&changes)),
    }
    0
}

pub fn handle_functions(file: &Path) -> i32 {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return 1;
        }
    };

    let functions = match parse_functions(file, &content) {
        Ok(functions) => functions,
        Err(e) => {
            eprintln!("Error parsing {}: {}", file.display(), e);
            return 1;
        }
    };

    if functions.is_empty() {
        println!("No function definitions found.");
        return 0;
    }

    for function in &functions {
        println!(
            "{:<10} {} (lines {}-{})",
            function.kind.as_str(),
            function.name,
            function.start_line,
            function.end_line
        );
    }
    0
}
