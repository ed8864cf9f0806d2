//! Report generator
//!
//! Aggregates verification results into categorized findings plus a
//! human-readable summary. The title→category table is fixed and closed;
//! anything the checker invents beyond the known property titles falls into
//! the `unknown-error` catch-all.

use crate::checker::output::VerificationResult;
use std::path::PathBuf;

/// Closed set of finding categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingCategory {
    AssertionViolation,
    ArithmeticOverflow,
    ArithmeticUnderflow,
    DivisionByZero,
    ExecutionError,
    UnknownError,
}

impl FindingCategory {
    /// Map a failure title to its category. Static closed table with an
    /// explicit default arm.
    pub fn from_title(title: &str) -> FindingCategory {
        match title.trim() {
            "assertion" => FindingCategory::AssertionViolation,
            "arithmetic overflow" => FindingCategory::ArithmeticOverflow,
            "arithmetic underflow" => FindingCategory::ArithmeticUnderflow,
            "division by zero" => FindingCategory::DivisionByZero,
            "execution-error" => FindingCategory::ExecutionError,
            _ => FindingCategory::UnknownError,
        }
    }

    /// Stable rule identifier, also used as the SARIF ruleId
    pub fn id(&self) -> &'static str {
        match self {
            FindingCategory::AssertionViolation => "assertion-violation",
            FindingCategory::ArithmeticOverflow => "arithmetic-overflow",
            FindingCategory::ArithmeticUnderflow => "arithmetic-underflow",
            FindingCategory::DivisionByZero => "division-by-zero",
            FindingCategory::ExecutionError => "execution-error",
            FindingCategory::UnknownError => "unknown-error",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FindingCategory::AssertionViolation => "Assertion can be violated",
            FindingCategory::ArithmeticOverflow => "Arithmetic overflow is possible",
            FindingCategory::ArithmeticUnderflow => "Arithmetic underflow is possible",
            FindingCategory::DivisionByZero => "Division by zero is possible",
            FindingCategory::ExecutionError => "Model checker failed to execute",
            FindingCategory::UnknownError => "Unrecognized verification failure",
        }
    }

    /// Every category, for building a rule catalog
    pub fn all() -> &'static [FindingCategory] {
        &[
            FindingCategory::AssertionViolation,
            FindingCategory::ArithmeticOverflow,
            FindingCategory::ArithmeticUnderflow,
            FindingCategory::DivisionByZero,
            FindingCategory::ExecutionError,
            FindingCategory::UnknownError,
        ]
    }
}

/// One normalized, categorized, location-tagged verification issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub category: FindingCategory,
    pub message: String,
    pub file: PathBuf,
    /// Always >= 1; unknown failure lines are coerced to 1
    pub line: u64,
    pub column: Option<u64>,
}

/// Emit one finding per failure record of every non-verified result.
pub fn generate_findings(results: &[VerificationResult]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for result in results.iter().filter(|r| !r.verified) {
        for failure in &result.failures {
            let category = FindingCategory::from_title(&failure.title);
            findings.push(Finding {
                category,
                message: format!(
                    "{} in function '{}': {}",
                    category.description(),
                    failure.function_name,
                    failure.failing_code
                ),
                file: result.file.clone(),
                line: if failure.line > 0 { failure.line as u64 } else { 1 },
                column: None,
            });
        }
    }

    findings
}

/// Aggregate textual summary over all results.
pub fn summarize(results: &[VerificationResult]) -> String {
    if results.is_empty() {
        return "No changed functions required model checking.".to_string();
    }

    let total = results.len();
    let verified = results.iter().filter(|r| r.verified).count();
    let failed = total - verified;

    let mut summary = format!(
        "Model checking finished: {} function(s) checked, {} verified, {} failed.\n",
        total, verified, failed
    );

    if failed == 0 {
        summary.push_str("All changed functions verified successfully.\n");
        return summary;
    }

    for result in results.iter().filter(|r| !r.verified) {
        summary.push_str(&format!(
            "\n{} ({}):\n",
            result.function_name,
            result.file.display()
        ));
        for failure in &result.failures {
            let location = if failure.line > 0 {
                format!("line {}", failure.line)
            } else {
                "unknown line".to_string()
            };
            summary.push_str(&format!(
                "  {} at {}: {}\n",
                FindingCategory::from_title(&failure.title).id(),
                location,
                failure.failing_code
            ));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::output::FailureRecord;
    use std::path::Path;

    fn failed_result(function: &str, failures: Vec<FailureRecord>) -> VerificationResult {
        VerificationResult {
            verified: false,
            failures,
            raw_output: String::new(),
            file: PathBuf::from("token.clar"),
            function_name: function.to_string(),
        }
    }

    fn verified_result(function: &str) -> VerificationResult {
        VerificationResult {
            verified: true,
            failures: Vec::new(),
            raw_output: String::new(),
            file: PathBuf::from("token.clar"),
            function_name: function.to_string(),
        }
    }

    fn failure(title: &str, line: i64) -> FailureRecord {
        FailureRecord {
            function_name: "deposit".to_string(),
            line,
            title: title.to_string(),
            failing_code: "(asserts! false)".to_string(),
        }
    }

    #[test]
    fn known_titles_map_to_their_categories() {
        assert_eq!(
            FindingCategory::from_title("assertion"),
            FindingCategory::AssertionViolation
        );
        assert_eq!(
            FindingCategory::from_title("arithmetic overflow"),
            FindingCategory::ArithmeticOverflow
        );
        assert_eq!(
            FindingCategory::from_title("arithmetic underflow"),
            FindingCategory::ArithmeticUnderflow
        );
        assert_eq!(
            FindingCategory::from_title("division by zero"),
            FindingCategory::DivisionByZero
        );
        assert_eq!(
            FindingCategory::from_title("execution-error"),
            FindingCategory::ExecutionError
        );
    }

    #[test]
    fn unrecognized_title_falls_into_catch_all() {
        assert_eq!(
            FindingCategory::from_title("heap-corruption"),
            FindingCategory::UnknownError
        );
    }

    #[test]
    fn one_finding_per_failure_of_non_verified_results() {
        let results = vec![
            verified_result("get-balance"),
            failed_result(
                "deposit",
                vec![failure("assertion", 17), failure("arithmetic overflow", 9)],
            ),
        ];
        let findings = generate_findings(&results);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].category, FindingCategory::AssertionViolation);
        assert_eq!(findings[0].line, 17);
        assert_eq!(findings[1].category, FindingCategory::ArithmeticOverflow);
        assert_eq!(findings[0].file, Path::new("token.clar"));
    }

    #[test]
    fn unknown_line_is_coerced_to_one_never_zero_or_negative() {
        let results = vec![failed_result("deposit", vec![failure("assertion", -1)])];
        let findings = generate_findings(&results);
        assert_eq!(findings[0].line, 1);

        let results = vec![failed_result("deposit", vec![failure("assertion", 0)])];
        assert_eq!(generate_findings(&results)[0].line, 1);
    }

    #[test]
    fn message_interpolates_function_and_failing_code() {
        let results = vec![failed_result("deposit", vec![failure("assertion", 17)])];
        let findings = generate_findings(&results);
        assert!(findings[0].message.contains("'deposit'"));
        assert!(findings[0].message.contains("(asserts! false)"));
    }

    #[test]
    fn summary_counts_and_breakdown() {
        let results = vec![
            verified_result("get-balance"),
            failed_result("deposit", vec![failure("assertion", 17)]),
        ];
        let summary = summarize(&results);

        assert!(summary.contains("2 function(s) checked, 1 verified, 1 failed"));
        assert!(summary.contains("deposit (token.clar)"));
        assert!(summary.contains("assertion-violation at line 17"));
    }

    #[test]
    fn full_success_summary() {
        let results = vec![verified_result("a"), verified_result("b")];
        let summary = summarize(&results);
        assert!(summary.contains("2 verified, 0 failed"));
        assert!(summary.contains("All changed functions verified successfully."));
    }

    #[test]
    fn empty_results_summary() {
        assert_eq!(
            summarize(&[]),
            "No changed functions required model checking."
        );
    }
}
