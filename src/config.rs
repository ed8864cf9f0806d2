//! Configuration
//!
//! Typed options bundle consumed by job planning and the top-level pass/fail
//! decision. Loadable from a TOML file (`clarity-model-check.toml`); the CLI
//! layers its own flag overrides on top.

use crate::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// When the overall run is considered failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailPolicy {
    /// Any non-verified function fails the run
    #[default]
    OnFailure,
    /// Report findings but always finish successfully
    Never,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Directory searched for `*.clar` contracts when no explicit file list
    /// is given
    pub contracts_dir: PathBuf,
    /// Regex patterns; files whose path matches any pattern get no jobs
    pub exclude: Vec<String>,
    /// Checker flags appended after the baseline set
    pub checker_flags: String,
    pub fail_policy: FailPolicy,
    /// External command producing an AST artifact for a contract
    pub ast_command: String,
    /// External model-checker command
    pub checker_command: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            contracts_dir: PathBuf::from("contracts"),
            exclude: Vec::new(),
            checker_flags: String::new(),
            fail_policy: FailPolicy::OnFailure,
            ast_command: "clarity-ast".to_string(),
            checker_command: "clarity-mc".to_string(),
        }
    }
}

impl Options {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Options> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Compile the exclusion patterns once per run.
    pub fn compiled_excludes(&self) -> Result<Vec<Regex>> {
        self.exclude
            .iter()
            .map(|pattern| Regex::new(pattern).map_err(Error::from))
            .collect()
    }

    /// Enumerate all `*.clar` contracts under the configured directory, in
    /// stable (sorted) order.
    pub fn discover_contracts(&self) -> Result<Vec<PathBuf>> {
        let mut contracts = Vec::new();

        for entry in WalkDir::new(&self.contracts_dir)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("clar") {
                contracts.push(path.to_path_buf());
            }
        }

        contracts.sort();
        Ok(contracts)
    }
}
