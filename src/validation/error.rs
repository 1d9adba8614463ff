//! Validation findings and the paths that locate them.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// Location of a field, rendered as `variations[2].holdConfiguration.holds[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &'static str) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    MissingField,
    OutOfRange,
    DuplicateId,
    DanglingReference,
    InvalidEnum,
    TypeMismatch,
    NotSorted,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::OutOfRange => "out_of_range",
            Self::DuplicateId => "duplicate_id",
            Self::DanglingReference => "dangling_reference",
            Self::InvalidEnum => "invalid_enum",
            Self::TypeMismatch => "type_mismatch",
            Self::NotSorted => "not_sorted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violation of the document contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub path: FieldPath,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: FieldPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.kind, self.message)
    }
}

/// Every violation found in one document, in discovery order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Append findings from a later pass.
    ///
    /// Findings at or under a path already reported are skipped: the earlier
    /// pass replaced that value, so later findings there describe the stand-in.
    pub fn merge(&mut self, other: impl IntoIterator<Item = ValidationError>) {
        let reported: Vec<FieldPath> = self.0.iter().map(|e| e.path.clone()).collect();
        self.0.extend(
            other
                .into_iter()
                .filter(|error| !reported.iter().any(|path| error.path.starts_with(path))),
        );
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |e| e.kind == kind)
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s): ", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Non-blocking finding reported alongside a valid document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub path: FieldPath,
    pub message: String,
}

impl Advisory {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = FieldPath::root()
            .key("variations")
            .index(2)
            .key("holdConfiguration")
            .key("combinedLimits")
            .index(0)
            .key("holds")
            .index(1);
        assert_eq!(
            path.to_string(),
            "variations[2].holdConfiguration.combinedLimits[0].holds[1]"
        );
        assert_eq!(FieldPath::root().to_string(), "<root>");
        assert_eq!(FieldPath::root().key("registration").to_string(), "registration");
    }

    #[test]
    fn test_path_prefix() {
        let limit = FieldPath::root().key("combinedLimits").index(0);
        let entry = limit.key("holds").index(3);
        assert!(entry.starts_with(&limit));
        assert!(!limit.starts_with(&entry));
    }

    #[test]
    fn test_merge_skips_repaired_subtrees() {
        let policy = FieldPath::root()
            .key("variations")
            .index(0)
            .key("weightPolicy")
            .key("passenger")
            .key("paxWeightPolicies")
            .index(0);
        let mut errors = ValidationErrors::from(vec![ValidationError::new(
            policy.key("maleWeight"),
            ErrorKind::MissingField,
            "required field `maleWeight` is missing",
        )]);
        errors.merge(vec![
            ValidationError::new(policy.key("maleWeight"), ErrorKind::OutOfRange, "found 0"),
            ValidationError::new(policy.key("femaleWeight"), ErrorKind::OutOfRange, "found -1"),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.of_kind(ErrorKind::OutOfRange).count(), 1);
        assert_eq!(
            errors.of_kind(ErrorKind::OutOfRange).next().unwrap().path,
            policy.key("femaleWeight")
        );
    }

    #[test]
    fn test_errors_serialize_with_string_paths() {
        let errors = ValidationErrors::from(vec![ValidationError::new(
            FieldPath::root().key("registration"),
            ErrorKind::OutOfRange,
            "registration must be exactly 5 characters",
        )]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["path"], "registration");
        assert_eq!(json[0]["kind"], "OutOfRange");
    }
}
