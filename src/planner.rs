//! Verification job planner
//!
//! Groups changed functions by file and emits one model-checker job per
//! (file, changed function) pair. Each file needs an AST artifact from the
//! external provider; a file without one is skipped with a warning rather
//! than failing the run.

use crate::diff::ChangedFunction;
use crate::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Flags passed to the checker on every job, before any caller overrides.
///
/// Overrides are appended after the baseline so a caller can extend or
/// textually override individual switches.
pub const BASELINE_FLAGS: &[&str] = &[
    "--trace",
    "--bounds-check",
    "--div-by-zero-check",
    "--signed-overflow-check",
    "--unsigned-overflow-check",
    "--unwind",
    "10",
];

/// Reference to an externally generated AST artifact for one contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstArtifact {
    pub path: PathBuf,
}

/// External collaborator that produces AST artifacts per contract file.
///
/// `Ok(None)` means no artifact could be produced; the planner skips the
/// file's jobs. An `Err` is treated the same way, since a missing artifact is
/// never fatal to the batch.
pub trait AstProvider {
    fn artifact(&self, file: &Path) -> Result<Option<AstArtifact>>;
}

/// One model-checker invocation: a single changed function of a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationJob {
    pub file: PathBuf,
    pub function_name: String,
    /// Contract identifier: the file name without extension
    pub contract_id: String,
    pub artifact: AstArtifact,
    /// Resolved flag string: baseline flags first, caller overrides appended
    pub flags: String,
}

/// Concatenate the baseline flag set with caller-supplied overrides.
pub fn resolve_flags(overrides: &str) -> String {
    let baseline = BASELINE_FLAGS.join(" ");
    if overrides.trim().is_empty() {
        baseline
    } else {
        format!("{} {}", baseline, overrides.trim())
    }
}

/// Plan one job per changed function, grouped by file.
///
/// Job order is file discovery order crossed with within-file function order,
/// exactly as the change set presents them. Files matching an exclusion
/// pattern produce no jobs.
pub fn plan_jobs(
    changes: &[ChangedFunction],
    provider: &dyn AstProvider,
    exclude: &[Regex],
    flag_overrides: &str,
) -> Vec<VerificationJob> {
    let flags = resolve_flags(flag_overrides);
    let mut jobs = Vec::new();

    for (file, functions) in group_by_file(changes) {
        let path_text = file.to_string_lossy();
        if exclude.iter().any(|re| re.is_match(&path_text)) {
            debug!(file = %file.display(), "file excluded from verification");
            continue;
        }

        let artifact = match provider.artifact(&file) {
            Ok(Some(artifact)) => artifact,
            Ok(None) => {
                warn!(file = %file.display(), "no AST artifact available, skipping file");
                continue;
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "AST artifact generation failed, skipping file");
                continue;
            }
        };

        let contract_id = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        for function in functions {
            jobs.push(VerificationJob {
                file: file.clone(),
                function_name: function.definition.name.clone(),
                contract_id: contract_id.clone(),
                artifact: artifact.clone(),
                flags: flags.clone(),
            });
        }
    }

    jobs
}

/// Group changes by file, preserving first-seen file order and within-file
/// function order.
fn group_by_file(changes: &[ChangedFunction]) -> Vec<(PathBuf, Vec<&ChangedFunction>)> {
    let mut groups: Vec<(PathBuf, Vec<&ChangedFunction>)> = Vec::new();

    for change in changes {
        let file = &change.definition.file;
        match groups.iter_mut().find(|(path, _)| path == file) {
            Some((_, group)) => group.push(change),
            None => groups.push((file.clone(), vec![change])),
        }
    }

    groups
}
