//! JSON import and export.

use serde_json::Value;

use crate::codec::error::ParseError;
use crate::document::Root;
use crate::observability::metrics;
use crate::validation::{
    self, check_structure, ValidatedDocument, ValidationError, ValidationErrors, ValidationOptions,
};

/// Export as indented JSON. Works for any document, valid or not.
///
/// Non-finite numbers are written as `null` and come back as structural
/// findings on re-import.
pub fn serialize(root: &Root) -> String {
    serde_json::to_string_pretty(root).expect("document tree has only string map keys")
}

/// Export as single-line JSON.
pub fn serialize_compact(root: &Root) -> String {
    serde_json::to_string(root).expect("document tree has only string map keys")
}

/// A document read from text, plus what the structural check found.
///
/// Findings mark values that were missing, mistyped or unknown and have been
/// replaced by baseline defaults. [`Imported::validate`] reports them together
/// with the semantic rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Imported {
    root: Root,
    findings: Vec<ValidationError>,
}

impl Imported {
    /// True when the text matched the document shape exactly.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn findings(&self) -> &[ValidationError] {
        &self.findings
    }

    /// Split into the repaired document and the structural findings.
    pub fn into_parts(self) -> (Root, Vec<ValidationError>) {
        (self.root, self.findings)
    }

    /// Run the semantic rules and merge them with the structural findings.
    ///
    /// Rule findings inside a repaired value are dropped.
    pub fn validate(
        self,
        options: &ValidationOptions,
    ) -> Result<ValidatedDocument, ValidationErrors> {
        let mut report = validation::check(&self.root, options);
        let mut errors = ValidationErrors::from(self.findings);
        errors.merge(report.errors);
        report.errors = errors;
        validation::finish(self.root, report)
    }
}

/// Read a document without running the semantic rules.
///
/// Only malformed JSON fails. Shape problems are returned as findings on the
/// result; call [`Imported::validate`] to get the full report.
pub fn deserialize(text: &str) -> Result<Imported, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => return Err(rejected(err.into())),
    };

    let findings = check_structure(&mut value);
    let root: Root = serde_json::from_value(value).map_err(|err| rejected(err.into()))?;

    metrics::record_import("parsed");
    tracing::debug!(
        registration = %root.registration,
        findings = findings.len(),
        "Document imported"
    );
    Ok(Imported { root, findings })
}

/// [`deserialize`] from raw bytes, rejecting invalid UTF-8.
pub fn deserialize_bytes(bytes: &[u8]) -> Result<Imported, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|err| rejected(err.into()))?;
    deserialize(text)
}

fn rejected(err: ParseError) -> ParseError {
    metrics::record_import(err.outcome());
    tracing::warn!(error = %err, "Import rejected");
    err
}
