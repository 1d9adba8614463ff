//! Metrics collection.
//!
//! # Metrics
//! - `wb_documents_validated_total` (counter): validations by outcome
//! - `wb_validation_errors_total` (counter): findings by error kind
//! - `wb_imports_total` (counter): imports by outcome
//!
//! # Design Decisions
//! - Counters only; documents are small and validation is synchronous
//! - Labels are fixed strings so cardinality stays bounded

use ::metrics::counter;

use crate::validation::ValidationErrors;

/// Record one validation run and its findings.
pub fn record_validation(errors: &ValidationErrors) {
    let outcome = if errors.is_empty() { "valid" } else { "invalid" };
    counter!("wb_documents_validated_total", "outcome" => outcome).increment(1);

    for error in errors {
        counter!("wb_validation_errors_total", "kind" => error.kind.as_str()).increment(1);
    }
}

/// Record an import attempt by outcome label, e.g. `parsed` or `syntax_error`.
pub fn record_import(outcome: &'static str) {
    counter!("wb_imports_total", "outcome" => outcome).increment(1);
}
