//! Model-checker invocation
//!
//! The checker itself is an external collaborator behind [`ModelChecker`].
//! Jobs run strictly one at a time: the checker's execution environment is
//! not safe for concurrent invocation, so the runner never overlaps calls.

pub mod output;

use crate::planner::VerificationJob;
use crate::Result;
use output::VerificationResult;
use tracing::{debug, info};

/// External model checker: one blocking invocation per job.
///
/// An `Err` from [`ModelChecker::check`] is an execution fault of the tool
/// itself (spawn failure, non-zero exit). The runner converts it into an
/// `execution-error` failure result; it never aborts the batch.
pub trait ModelChecker {
    fn check(&self, job: &VerificationJob) -> Result<String>;
}

/// Run every job serially and collect one result per job, in job order.
pub fn run_jobs(jobs: &[VerificationJob], checker: &dyn ModelChecker) -> Vec<VerificationResult> {
    let mut results = Vec::with_capacity(jobs.len());

    for job in jobs {
        info!(
            contract = %job.contract_id,
            function = %job.function_name,
            "checking function"
        );

        let result = match checker.check(job) {
            Ok(raw) => match output::classify_output(&raw, &job.file, &job.function_name) {
                Ok(result) => result,
                Err(e) => output::execution_error(&e.to_string(), &job.file, &job.function_name),
            },
            Err(e) => {
                debug!(function = %job.function_name, error = %e, "checker execution fault");
                output::execution_error(&e.to_string(), &job.file, &job.function_name)
            }
        };

        results.push(result);
    }

    results
}
