//! Top-level orchestrator
//!
//! Wires the pipeline end to end: fetch both revisions of each contract,
//! parse and compare them, plan one checker job per changed function, run the
//! jobs strictly serially, and aggregate the results into findings and a
//! summary. The pipeline exclusively owns the job queue and the results
//! accumulator; nothing here runs concurrently.
//!
//! No job-level fault aborts a run. Fetch failures degrade to absent content,
//! missing artifacts skip their file, checker faults become `execution-error`
//! results, and the batch always runs to completion.

use crate::checker::{self, ModelChecker};
use crate::config::{FailPolicy, Options};
use crate::diff::{compare, ChangedFunction};
use crate::parser::{parse_functions, FunctionDefinition};
use crate::planner::{plan_jobs, AstProvider};
use crate::report::{generate_findings, summarize, Finding};
use crate::Result;
use crate::checker::output::VerificationResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// External collaborator that supplies file content at a given revision.
///
/// `Ok(None)` means the file does not exist at that revision. An `Err` is
/// logged and degraded to absent content; it never fails the run.
pub trait RevisionFetcher {
    fn fetch(&self, revision: &str, path: &Path) -> Result<Option<String>>;
}

/// Overall status of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
    /// The comparator yielded an empty change set; all downstream stages
    /// were skipped
    NoChanges,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Failure => "failure",
            RunStatus::NoChanges => "no_changes",
        }
    }
}

/// Everything one run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub changes: Vec<ChangedFunction>,
    pub results: Vec<VerificationResult>,
    pub findings: Vec<Finding>,
    pub summary: String,
}

/// The assembled pipeline over its three external collaborators
pub struct Pipeline<'a> {
    fetcher: &'a dyn RevisionFetcher,
    provider: &'a dyn AstProvider,
    checker: &'a dyn ModelChecker,
    options: &'a Options,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn RevisionFetcher,
        provider: &'a dyn AstProvider,
        checker: &'a dyn ModelChecker,
        options: &'a Options,
    ) -> Self {
        Pipeline {
            fetcher,
            provider,
            checker,
            options,
        }
    }

    /// Compute the change set between two revisions across all files.
    pub fn collect_changes(
        &self,
        base_revision: &str,
        head_revision: &str,
        files: &[PathBuf],
    ) -> Result<Vec<ChangedFunction>> {
        let mut changes = Vec::new();

        for file in files {
            let base = self.functions_at(base_revision, file)?;
            let head = self.functions_at(head_revision, file)?;
            changes.extend(compare(&base, &head));
        }

        Ok(changes)
    }

    /// Run the whole pipeline for the given revisions and file list. An empty
    /// file list falls back to discovering contracts under the configured
    /// directory.
    pub fn run(
        &self,
        base_revision: &str,
        head_revision: &str,
        files: &[PathBuf],
    ) -> Result<RunOutcome> {
        let files = if files.is_empty() {
            self.options.discover_contracts()?
        } else {
            files.to_vec()
        };

        let changes = self.collect_changes(base_revision, head_revision, &files)?;
        if changes.is_empty() {
            info!("no function changes detected, skipping verification");
            return Ok(RunOutcome {
                status: RunStatus::NoChanges,
                changes,
                results: Vec::new(),
                findings: Vec::new(),
                summary: "No function changes detected between revisions.".to_string(),
            });
        }
        info!(count = changes.len(), "changed functions detected");

        let exclude = self.options.compiled_excludes()?;
        let jobs = plan_jobs(
            &changes,
            self.provider,
            &exclude,
            &self.options.checker_flags,
        );

        let results = checker::run_jobs(&jobs, self.checker);
        let findings = generate_findings(&results);
        let summary = summarize(&results);

        let any_failed = results.iter().any(|r| !r.verified);
        let status = match self.options.fail_policy {
            FailPolicy::OnFailure if any_failed => RunStatus::Failure,
            _ => RunStatus::Success,
        };

        Ok(RunOutcome {
            status,
            changes,
            results,
            findings,
            summary,
        })
    }

    /// Parse the functions of one file at one revision. Absent or unfetchable
    /// content parses as zero functions.
    fn functions_at(&self, revision: &str, file: &Path) -> Result<Vec<FunctionDefinition>> {
        let content = match self.fetcher.fetch(revision, file) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    revision,
                    file = %file.display(),
                    error = %e,
                    "content fetch failed, treating as absent"
                );
                None
            }
        };

        match content {
            Some(text) => parse_functions(file, &text),
            None => Ok(Vec::new()),
        }
    }
}
