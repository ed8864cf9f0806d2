//! Process adapters for the AST generator and the model checker
//!
//! Both external tools are plain commands configured in the options bundle.
//! The AST generator prints the artifact path on stdout; the checker receives
//! the artifact, the target function, the resolved flags, and the source
//! file, and its combined output is handed back verbatim for parsing.

use clarity_model_check::planner::{AstArtifact, AstProvider, VerificationJob};
use clarity_model_check::checker::ModelChecker;
use clarity_model_check::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Split a configured command line into program and leading arguments.
fn command_for(spec: &str) -> Result<Command> {
    let mut parts = spec.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| Error::Config("empty command line".to_string()))?;
    let mut command = Command::new(program);
    command.args(parts);
    Ok(command)
}

/// AST provider backed by an external generator command
pub struct CommandAstProvider {
    command_line: String,
}

impl CommandAstProvider {
    pub fn new(command_line: String) -> Self {
        CommandAstProvider { command_line }
    }
}

impl AstProvider for CommandAstProvider {
    fn artifact(&self, file: &Path) -> Result<Option<AstArtifact>> {
        let output = command_for(&self.command_line)?.arg(file).output()?;

        if !output.status.success() {
            debug!(file = %file.display(), "AST generator reported failure");
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = match stdout.trim() {
            "" => file.with_extension("ast"),
            reported => reported.into(),
        };
        Ok(Some(AstArtifact { path }))
    }
}

/// Model checker backed by an external command
pub struct CommandChecker {
    command_line: String,
}

impl CommandChecker {
    pub fn new(command_line: String) -> Self {
        CommandChecker { command_line }
    }
}

impl ModelChecker for CommandChecker {
    fn check(&self, job: &VerificationJob) -> Result<String> {
        let output = command_for(&self.command_line)?
            .arg(&job.artifact.path)
            .arg("--contract")
            .arg(&job.contract_id)
            .arg("--function")
            .arg(&job.function_name)
            .args(job.flags.split_whitespace())
            .arg(&job.file)
            .output()
            .map_err(|e| Error::Checker(format!("{}: {}", self.command_line, e)))?;

        if !output.status.success() {
            return Err(Error::Checker(format!(
                "exit {}: {}",
                output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let mut raw = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            raw.push('\n');
            raw.push_str(&stderr);
        }
        Ok(raw)
    }
}
