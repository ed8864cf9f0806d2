//! Clarity source parsing
//!
//! Extracts function boundaries from raw contract text. The parser is
//! deliberately shallow: it recognizes top-level definition headers and
//! tracks parenthesis depth, nothing more.

pub mod functions;

pub use functions::{parse_functions, FunctionDefinition, FunctionKind};
