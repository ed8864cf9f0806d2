//! Function boundary parser
//!
//! Scans a Clarity contract line by line and extracts every top-level
//! function definition with its 1-based line span and raw text. A definition
//! starts on a line whose first column opens one of the three definition
//! forms (`define-public`, `define-private`, `define-read-only`) and ends on
//! the line where the parenthesis depth returns to zero.
//!
//! The depth counter scans raw characters. It does not special-case string
//! literals or `;;` comments, so a stray parenthesis inside either perturbs
//! the tracked depth. That fragility is a documented property of the scanner,
//! not something it papers over: unbalanced input consumes the remainder of
//! the file into the open function instead of erroring.

use crate::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Visibility of a Clarity function definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Public,
    Private,
    ReadOnly,
}

impl FunctionKind {
    fn from_keyword(keyword: &str) -> Option<FunctionKind> {
        match keyword {
            "public" => Some(FunctionKind::Public),
            "private" => Some(FunctionKind::Private),
            "read-only" => Some(FunctionKind::ReadOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Public => "public",
            FunctionKind::Private => "private",
            FunctionKind::ReadOnly => "read-only",
        }
    }
}

/// One top-level function definition extracted from a contract
///
/// Spans are 1-based and inclusive. `body` is the raw text of the definition,
/// header line through closing line, exactly as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: String,
    pub kind: FunctionKind,
    pub file: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
    pub body: String,
}

/// Matches a top-level definition header and captures kind and name.
///
/// Top-level definitions start in column 0; nested `define-` forms are
/// indented and therefore never recognized as new boundaries.
const HEADER_PATTERN: &str =
    r"^\(define-(public|private|read-only)\s+\(\s*([^\s()]+)";

/// A definition currently being accumulated by the scanner
struct OpenDefinition {
    name: String,
    kind: FunctionKind,
    start_line: usize,
    depth: i64,
    lines: Vec<String>,
}

impl OpenDefinition {
    fn close(self, file: &Path, end_line: usize) -> FunctionDefinition {
        FunctionDefinition {
            name: self.name,
            kind: self.kind,
            file: file.to_path_buf(),
            start_line: self.start_line,
            end_line,
            body: self.lines.join("\n"),
        }
    }
}

/// Parse all top-level function definitions from one contract's text.
///
/// Pure: identical input always yields an identical sequence, in source
/// order. Non-function forms (`define-map`, `define-constant`, ...) are
/// skipped entirely.
pub fn parse_functions(file: &Path, text: &str) -> Result<Vec<FunctionDefinition>> {
    let header_re = Regex::new(HEADER_PATTERN)?;

    let mut functions = Vec::new();
    let mut open: Option<OpenDefinition> = None;
    let mut last_line = 0;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;

        match open.take() {
            None => {
                let Some(caps) = header_re.captures(line) else {
                    continue;
                };
                let Some(kind) = caps.get(1).and_then(|m| FunctionKind::from_keyword(m.as_str()))
                else {
                    continue;
                };
                let name = caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();

                // Depth starts at 1: the header's opening parenthesis is
                // already consumed by the match. Scanning resumes right after
                // the keyword so the argument list's parens still count.
                let scan_from = caps.get(1).map_or(0, |m| m.end());
                let mut def = OpenDefinition {
                    name,
                    kind,
                    start_line: line_no,
                    depth: 1,
                    lines: vec![line.to_string()],
                };
                def.depth += paren_delta_until_zero(&line[scan_from..], def.depth);
                if def.depth == 0 {
                    functions.push(def.close(file, line_no));
                } else {
                    open = Some(def);
                }
            }
            Some(mut def) => {
                def.lines.push(line.to_string());
                def.depth += paren_delta_until_zero(line, def.depth);
                if def.depth == 0 {
                    functions.push(def.close(file, line_no));
                } else {
                    open = Some(def);
                }
            }
        }
    }

    // Unbalanced input: the open definition swallows the rest of the file.
    if let Some(def) = open {
        functions.push(def.close(file, last_line));
    }

    Ok(functions)
}

/// Net parenthesis adjustment for `text`, stopping as soon as the running
/// depth would reach zero. Text after the closing parenthesis of a definition
/// is ignored, matching the line-based span contract.
fn paren_delta_until_zero(text: &str, start_depth: i64) -> i64 {
    let mut depth = start_depth;
    for ch in text.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            break;
        }
    }
    depth - start_depth
}
