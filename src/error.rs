//! Crate error type
//!
//! Job-level faults (checker crashes, unreadable output) are deliberately not
//! errors: they degrade into failure records so a batch always runs to
//! completion. This type covers the faults that genuinely stop a run, such as
//! an invalid configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A regex pattern failed to compile (scanner patterns, exclusion rules)
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The external checker could not be invoked at all
    #[error("checker invocation failed: {0}")]
    Checker(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
