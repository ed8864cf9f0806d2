//! CLI command handlers and process-backed collaborator adapters

pub mod check;
pub mod format;
pub mod git;
pub mod tools;
