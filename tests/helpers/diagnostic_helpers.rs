//! Assertions over validation reports.

use idl_sema::{DiagnosticId, ValidationReport};

pub fn error_messages(report: &ValidationReport) -> Vec<String> {
    report.errors().map(|d| d.message.to_string()).collect()
}

pub fn warning_ids(report: &ValidationReport) -> Vec<DiagnosticId> {
    report.warnings().filter_map(|d| d.id).collect()
}

/// Assert the report has no errors.
pub fn assert_valid(report: &ValidationReport) {
    let errors = error_messages(report);
    assert!(
        report.valid && errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|e| format!("  {}", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Assert validation failed with an error containing `expected`.
pub fn assert_error(report: &ValidationReport, expected: &str) {
    let errors = error_messages(report);
    assert!(!report.valid, "Expected validation to fail");
    assert!(
        errors.iter().any(|e| e.contains(expected)),
        "Expected an error containing '{}', got:\n{}",
        expected,
        errors.join("\n")
    );
}
