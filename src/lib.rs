//! # clarity-model-check
//!
//! Change-driven formal verification for Clarity smart contracts.
//!
//! This crate provides:
//! - A function-boundary parser that extracts top-level Clarity definitions
//! - A change comparator that classifies functions as added/modified/deleted
//!   between two revisions of a contract
//! - A job planner that turns changed functions into one model-checker
//!   invocation per function
//! - A parser for the model checker's raw text output (counterexample blocks)
//! - A report generator that categorizes failures into findings, plus a SARIF
//!   adapter for static-analysis tooling
//!
//! ## Usage
//!
//! ```no_run
//! use clarity_model_check::parser::parse_functions;
//! use clarity_model_check::diff::compare;
//! use std::path::Path;
//!
//! let base = parse_functions(Path::new("token.clar"), "(define-public (f) (ok true))")?;
//! let head = parse_functions(Path::new("token.clar"), "(define-public (f) (ok false))")?;
//! let changes = compare(&base, &head);
//! # Ok::<(), clarity_model_check::Error>(())
//! ```
//!
//! Revision content, AST artifacts, and the checker itself are external
//! collaborators behind the [`pipeline::RevisionFetcher`],
//! [`planner::AstProvider`], and [`checker::ModelChecker`] traits. The
//! `clarity-model-check` binary wires process-backed adapters for all three.

pub mod checker;
pub mod config;
pub mod diff;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod planner;
pub mod report;
pub mod sarif;

pub use error::{Error, Result};
