//! Model-checker output parser
//!
//! Turns the checker's raw text stream into structured failure records. The
//! interesting part of the stream is a sequence of counterexample blocks:
//!
//! ```text
//! [Counterexample]
//!
//! State 3 file sample.clar line 17 function deposit thread 0
//! ...
//! Violated property:
//!
//!   assertion
//!
//!   try! (stx-transfer? amount tx-sender (as-contract tx-sender))
//! ```
//!
//! The parser is an explicit finite-state machine over a line cursor. `State`
//! lines annotate the current location; later annotations overwrite earlier
//! ones within the same block. A `Violated property:` trigger captures the
//! next two content lines (title, then failing code), emits one record, and
//! closes the block: a fresh `[Counterexample]` marker is required before
//! another record can be emitted.

use crate::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Marker line opening a counterexample block
const COUNTEREXAMPLE_MARKER: &str = "[Counterexample]";

/// Trigger prefix inside a counterexample block
const VIOLATED_PREFIX: &str = "Violated property:";

/// Overall-verdict markers scanned over the whole blob
const SUCCESS_MARKER: &str = "VERIFICATION SUCCESSFUL";
const FAILURE_MARKER: &str = "VERIFICATION FAILED";

/// Function name used when a block carries no `State` annotation
pub const UNKNOWN_FUNCTION: &str = "unknown_function";

/// Title of the synthetic record for output with no recognizable verdict
pub const UNKNOWN_RESULT_TITLE: &str = "unknown-result";

/// Title of the synthetic record for a checker that failed to execute
pub const EXECUTION_ERROR_TITLE: &str = "execution-error";

const UNKNOWN_RESULT_DETAIL: &str =
    "the model checker produced no recognizable verdict; inspect the raw output";

const STATE_LINE_PATTERN: &str =
    r"^State\s+\d+\s+file\s+\S+\s+line\s+(\d+)\s+function\s+(\S+)\s+thread\s+\d+";

/// One property violation extracted from the checker output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub function_name: String,
    /// 1-based source line; -1 when the block carried no location
    pub line: i64,
    /// Free-text property category, e.g. `assertion`
    pub title: String,
    pub failing_code: String,
}

/// Outcome of one verification job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub verified: bool,
    pub failures: Vec<FailureRecord>,
    pub raw_output: String,
    pub file: PathBuf,
    pub function_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    InCounterexample,
}

/// Run the counterexample state machine over the full raw output.
pub fn parse_failures(raw: &str) -> Result<Vec<FailureRecord>> {
    let state_re = Regex::new(STATE_LINE_PATTERN)?;
    let lines: Vec<&str> = raw.lines().collect();

    let mut failures = Vec::new();
    let mut state = State::Scanning;
    let mut current_line: Option<i64> = None;
    let mut current_function: Option<String> = None;

    let mut cursor = 0;
    while cursor < lines.len() {
        let line = lines[cursor];

        match state {
            State::Scanning => {
                if line.trim() == COUNTEREXAMPLE_MARKER {
                    state = State::InCounterexample;
                    current_line = None;
                    current_function = None;
                }
                cursor += 1;
            }
            State::InCounterexample => {
                if let Some(caps) = state_re.captures(line.trim_start()) {
                    // Later State lines overwrite earlier ones within a block.
                    current_line = caps.get(1).and_then(|m| m.as_str().parse().ok());
                    current_function = caps.get(2).map(|m| m.as_str().to_string());
                    cursor += 1;
                } else if line.trim_start().starts_with(VIOLATED_PREFIX) {
                    let (title, after_title) = next_content_line(&lines, cursor + 1);
                    let (failing_code, after_code) = next_content_line(&lines, after_title);

                    failures.push(FailureRecord {
                        function_name: current_function
                            .take()
                            .unwrap_or_else(|| UNKNOWN_FUNCTION.to_string()),
                        line: current_line.take().unwrap_or(-1),
                        title,
                        failing_code,
                    });

                    // One record closes the block.
                    state = State::Scanning;
                    cursor = after_code;
                } else {
                    cursor += 1;
                }
            }
        }
    }

    Ok(failures)
}

/// Skip blank and whitespace-only lines starting at `start`; return the next
/// content line (trimmed) and the cursor position just past it. Missing
/// content at end of stream degrades to an empty capture.
fn next_content_line(lines: &[&str], start: usize) -> (String, usize) {
    let mut i = start;
    while i < lines.len() {
        let line = lines[i].trim();
        if !line.is_empty() {
            return (line.to_string(), i + 1);
        }
        i += 1;
    }
    (String::new(), i)
}

/// Classify a full output blob into a [`VerificationResult`].
///
/// The overall verdict markers dominate the per-block records: a blob
/// containing `VERIFICATION SUCCESSFUL` is verified with no failures no
/// matter what else it contains. A blob with neither marker yields a single
/// synthetic `unknown-result` record rather than an error.
pub fn classify_output(raw: &str, file: &Path, function_name: &str) -> Result<VerificationResult> {
    if raw.contains(SUCCESS_MARKER) {
        return Ok(VerificationResult {
            verified: true,
            failures: Vec::new(),
            raw_output: raw.to_string(),
            file: file.to_path_buf(),
            function_name: function_name.to_string(),
        });
    }

    let failures = if raw.contains(FAILURE_MARKER) {
        // Possibly empty when no counterexample block ever emitted a record.
        parse_failures(raw)?
    } else {
        vec![FailureRecord {
            function_name: function_name.to_string(),
            line: -1,
            title: UNKNOWN_RESULT_TITLE.to_string(),
            failing_code: UNKNOWN_RESULT_DETAIL.to_string(),
        }]
    };

    Ok(VerificationResult {
        verified: false,
        failures,
        raw_output: raw.to_string(),
        file: file.to_path_buf(),
        function_name: function_name.to_string(),
    })
}

/// Convert a checker execution fault into a failure result so the batch can
/// continue past it.
pub fn execution_error(error: &str, file: &Path, function_name: &str) -> VerificationResult {
    VerificationResult {
        verified: false,
        failures: vec![FailureRecord {
            function_name: function_name.to_string(),
            line: -1,
            title: EXECUTION_ERROR_TITLE.to_string(),
            failing_code: error.to_string(),
        }],
        raw_output: String::new(),
        file: file.to_path_buf(),
        function_name: function_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED_OUTPUT: &str = "\
Starting model checker

[Counterexample]

State 3 file sample.clar line 17 function deposit thread 0
----------------------------------------------------
  amount=100

Violated property:

  assertion

  try! (stx-transfer? amount tx-sender (as-contract tx-sender))

** VERIFICATION FAILED
";

    #[test]
    fn extracts_single_failure_record() {
        let failures = parse_failures(FAILED_OUTPUT).unwrap();
        assert_eq!(
            failures,
            vec![FailureRecord {
                function_name: "deposit".to_string(),
                line: 17,
                title: "assertion".to_string(),
                failing_code:
                    "try! (stx-transfer? amount tx-sender (as-contract tx-sender))".to_string(),
            }]
        );
    }

    #[test]
    fn later_state_lines_overwrite_earlier_ones() {
        let raw = "\
[Counterexample]
State 1 file sample.clar line 4 function get-balance thread 0
State 9 file sample.clar line 21 function withdraw thread 0
Violated property:
  arithmetic underflow
  (- balance amount)
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].function_name, "withdraw");
        assert_eq!(failures[0].line, 21);
    }

    #[test]
    fn block_without_state_annotation_is_unknown() {
        let raw = "\
[Counterexample]
Violated property:
  assertion
  (asserts! false)
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures[0].function_name, UNKNOWN_FUNCTION);
        assert_eq!(failures[0].line, -1);
    }

    #[test]
    fn one_record_closes_the_block() {
        // The second violation has no fresh [Counterexample] marker, so it is
        // never emitted.
        let raw = "\
[Counterexample]
State 1 file a.clar line 3 function f thread 0
Violated property:
  assertion
  (asserts! false)
Violated property:
  assertion
  (asserts! true)
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn each_marker_opens_a_new_block() {
        let raw = "\
[Counterexample]
State 1 file a.clar line 3 function f thread 0
Violated property:
  assertion
  (asserts! false)

[Counterexample]
State 2 file a.clar line 8 function g thread 0
Violated property:
  division by zero
  (/ x y)
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].function_name, "f");
        assert_eq!(failures[1].function_name, "g");
        assert_eq!(failures[1].title, "division by zero");
    }

    #[test]
    fn violated_property_outside_a_block_is_ignored() {
        let raw = "\
Violated property:
  assertion
  (asserts! false)
";
        assert!(parse_failures(raw).unwrap().is_empty());
    }

    #[test]
    fn annotation_does_not_leak_into_the_next_block() {
        let raw = "\
[Counterexample]
State 1 file a.clar line 3 function f thread 0
Violated property:
  assertion
  (asserts! false)

[Counterexample]
Violated property:
  assertion
  (asserts! false)
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures[1].function_name, UNKNOWN_FUNCTION);
        assert_eq!(failures[1].line, -1);
    }

    #[test]
    fn success_marker_dominates_everything_else() {
        let raw = format!("{FAILED_OUTPUT}\n** VERIFICATION SUCCESSFUL\n");
        let result = classify_output(&raw, Path::new("sample.clar"), "deposit").unwrap();
        assert!(result.verified);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn failed_marker_collects_all_records() {
        let result = classify_output(FAILED_OUTPUT, Path::new("sample.clar"), "deposit").unwrap();
        assert!(!result.verified);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].title, "assertion");
        assert_eq!(result.file, Path::new("sample.clar"));
    }

    #[test]
    fn failed_marker_with_no_blocks_is_represented_not_errored() {
        let result =
            classify_output("** VERIFICATION FAILED\n", Path::new("a.clar"), "f").unwrap();
        assert!(!result.verified);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn verdictless_output_yields_synthetic_unknown_result() {
        let result = classify_output("segfault maybe?\n", Path::new("a.clar"), "f").unwrap();
        assert!(!result.verified);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].title, UNKNOWN_RESULT_TITLE);
        assert_eq!(result.failures[0].line, -1);
        assert_eq!(result.failures[0].function_name, "f");
    }

    #[test]
    fn execution_error_carries_error_text_as_failing_code() {
        let result = execution_error("exit 127: command not found", Path::new("a.clar"), "f");
        assert!(!result.verified);
        assert_eq!(result.failures[0].title, EXECUTION_ERROR_TITLE);
        assert_eq!(result.failures[0].failing_code, "exit 127: command not found");
    }

    #[test]
    fn truncated_block_degrades_to_empty_captures() {
        let raw = "\
[Counterexample]
Violated property:
";
        let failures = parse_failures(raw).unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].title, "");
        assert_eq!(failures[0].failing_code, "");
    }
}
