//! Git-backed revision content fetcher
//!
//! Reads file content at a revision via `git show <rev>:<path>`. A path that
//! does not exist at the requested revision is absent content, not an error;
//! only a failure to run git at all surfaces as an error (which the pipeline
//! in turn degrades to absent).

use clarity_model_check::pipeline::RevisionFetcher;
use clarity_model_check::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub struct GitFetcher {
    repo_root: PathBuf,
}

impl GitFetcher {
    pub fn new(repo_root: PathBuf) -> Self {
        GitFetcher { repo_root }
    }
}

impl RevisionFetcher for GitFetcher {
    fn fetch(&self, revision: &str, path: &Path) -> Result<Option<String>> {
        // git object paths always use forward slashes
        let spec = format!("{}:{}", revision, path.to_string_lossy().replace('\\', "/"));

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .arg("show")
            .arg(&spec)
            .output()?;

        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            debug!(spec = %spec, "object not present at revision");
            Ok(None)
        }
    }
}
