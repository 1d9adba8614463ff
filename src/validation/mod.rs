//! Document validation.
//!
//! # Responsibilities
//! - Structural checks on imported JSON (structure.rs): presence, JSON types, enums
//! - Semantic checks on the typed tree (rules.rs): ranges, uniqueness,
//!   referential integrity, table ordering
//! - Advisory findings that never block use of the document
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function of the document and the options
//! - Parsing and validation are separate: an invalid document still imports

pub mod error;
pub mod rules;
pub mod structure;

use serde::{Deserialize, Serialize};

use crate::document::Root;
use crate::observability::metrics;

pub use error::{Advisory, ErrorKind, FieldPath, ValidationError, ValidationErrors};
pub use structure::check_structure;

/// Knobs for rules that are policy rather than shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Require at least one structural MTOW and one envelope type per variation.
    pub require_complete_variations: bool,

    /// Turn the "more than one default" advisory into an error.
    pub single_default: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_complete_variations: true,
            single_default: false,
        }
    }
}

/// A document that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDocument {
    root: Root,
    advisories: Vec<Advisory>,
}

impl ValidatedDocument {
    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn into_root(self) -> Root {
        self.root
    }

    /// Non-blocking findings, e.g. several variations marked default.
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}

/// Outcome of running the semantic rules without consuming the document.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub errors: ValidationErrors,
    pub advisories: Vec<Advisory>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every semantic rule against `root`.
pub fn check(root: &Root, options: &ValidationOptions) -> Report {
    let mut rules = rules::Rules::new(options);
    rules.root(root);
    Report {
        errors: rules.errors.into(),
        advisories: rules.advisories,
    }
}

/// Validate with default options.
pub fn validate(root: Root) -> Result<ValidatedDocument, ValidationErrors> {
    validate_with(root, &ValidationOptions::default())
}

pub fn validate_with(
    root: Root,
    options: &ValidationOptions,
) -> Result<ValidatedDocument, ValidationErrors> {
    let report = check(&root, options);
    finish(root, report)
}

/// Turn a report into the validation result, recording the outcome.
pub(crate) fn finish(root: Root, report: Report) -> Result<ValidatedDocument, ValidationErrors> {
    metrics::record_validation(&report.errors);

    if report.is_valid() {
        tracing::debug!(
            registration = %root.registration,
            variations = root.variations().len(),
            advisories = report.advisories.len(),
            "Document is valid"
        );
        Ok(ValidatedDocument {
            root,
            advisories: report.advisories,
        })
    } else {
        tracing::debug!(
            registration = %root.registration,
            errors = report.errors.len(),
            "Document failed validation"
        );
        Err(report.errors)
    }
}
