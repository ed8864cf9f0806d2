//! Change set comparator
//!
//! Diffs two parsed revisions of a contract by function name. Equality is
//! exact raw-text comparison, so whitespace-only and comment-only edits count
//! as modifications. Unchanged functions never appear in the output.

use crate::parser::FunctionDefinition;
use std::collections::HashMap;

/// How a function differs between the base and head revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Modified => "modified",
            ChangeType::Deleted => "deleted",
        }
    }
}

/// A function that differs between two revisions
///
/// Deleted functions carry the base-revision definition (the head has no
/// span for them); added and modified functions carry the head-revision
/// definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFunction {
    pub definition: FunctionDefinition,
    pub change: ChangeType,
}

/// Compare two revisions of one file's function definitions.
///
/// Identity is name-keyed: a name lands in exactly one change bucket per
/// comparison. A side parsed from absent content is simply an empty slice,
/// which degrades to an all-added or all-deleted result.
pub fn compare(base: &[FunctionDefinition], head: &[FunctionDefinition]) -> Vec<ChangedFunction> {
    let head_by_name: HashMap<&str, &FunctionDefinition> =
        head.iter().map(|f| (f.name.as_str(), f)).collect();
    let base_by_name: HashMap<&str, &FunctionDefinition> =
        base.iter().map(|f| (f.name.as_str(), f)).collect();

    let mut changes = Vec::new();

    for base_fn in base {
        match head_by_name.get(base_fn.name.as_str()) {
            None => changes.push(ChangedFunction {
                definition: base_fn.clone(),
                change: ChangeType::Deleted,
            }),
            Some(head_fn) if head_fn.body != base_fn.body => changes.push(ChangedFunction {
                definition: (*head_fn).clone(),
                change: ChangeType::Modified,
            }),
            Some(_) => {}
        }
    }

    for head_fn in head {
        if !base_by_name.contains_key(head_fn.name.as_str()) {
            changes.push(ChangedFunction {
                definition: head_fn.clone(),
                change: ChangeType::Added,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_functions;
    use std::path::Path;

    fn parse(text: &str) -> Vec<FunctionDefinition> {
        parse_functions(Path::new("sample.clar"), text).unwrap()
    }

    const BASE: &str = "\
(define-read-only (get-balance (who principal))
  (ok (default-to u0 (map-get? balances who))))

(define-public (deposit (amount uint))
  (begin
    (try! (stx-transfer? amount tx-sender (as-contract tx-sender)))
    (ok true)))
";

    #[test]
    fn identical_revisions_yield_no_changes() {
        assert!(compare(&parse(BASE), &parse(BASE)).is_empty());
    }

    #[test]
    fn edited_body_is_modified_with_head_span() {
        let head_text = BASE.replace("(ok true)", "(ok false)");
        let base = parse(BASE);
        let head = parse(&head_text);
        let changes = compare(&base, &head);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change, ChangeType::Modified);
        assert_eq!(changes[0].definition.name, "deposit");
        assert!(changes[0].definition.body.contains("(ok false)"));
    }

    #[test]
    fn whitespace_only_edit_counts_as_modification() {
        let head_text = BASE.replace("  (begin", "    (begin");
        let changes = compare(&parse(BASE), &parse(&head_text));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change, ChangeType::Modified);
    }

    #[test]
    fn new_function_is_added() {
        let head_text = format!("{BASE}\n(define-private (reset) (ok true))\n");
        let changes = compare(&parse(BASE), &parse(&head_text));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change, ChangeType::Added);
        assert_eq!(changes[0].definition.name, "reset");
    }

    #[test]
    fn removed_function_is_deleted_with_base_span() {
        let head = parse("(define-public (deposit (amount uint))\n  (ok true))\n");
        let base = parse(BASE);
        let changes = compare(&base, &head);

        let deleted: Vec<_> = changes
            .iter()
            .filter(|c| c.change == ChangeType::Deleted)
            .collect();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].definition.name, "get-balance");
        assert_eq!(deleted[0].definition.start_line, 1);
    }

    #[test]
    fn absent_base_marks_every_head_function_added() {
        let changes = compare(&[], &parse(BASE));
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.change == ChangeType::Added));
    }

    #[test]
    fn absent_head_marks_every_base_function_deleted() {
        let changes = compare(&parse(BASE), &[]);
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.change == ChangeType::Deleted));
    }

    #[test]
    fn each_name_lands_in_exactly_one_bucket() {
        let head_text = BASE
            .replace("(ok true)", "(ok false)")
            .replace(
                "(define-read-only (get-balance (who principal))",
                "(define-read-only (get-count (who principal))",
            );
        let changes = compare(&parse(BASE), &parse(&head_text));

        let mut names: Vec<&str> = changes.iter().map(|c| c.definition.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), changes.len());
    }
}
