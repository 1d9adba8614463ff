//! Editing session over one document.
//!
//! # Responsibilities
//! - Own the document being edited
//! - Typed edits on variations that keep identifiers positional
//! - Import that replaces the document only on success
//! - Opening files for rewriting without losing unreadable values
//! - Export to a named artifact
//!
//! # Design Decisions
//! - Fields are edited through `&mut` access; there is no path-string mutation
//! - Every structural edit to the variation list is followed by a renumber
//! - Validation runs on a snapshot so the session keeps the draft either way

pub mod watcher;

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::codec::{self, ParseError};
use crate::config::ExportSettings;
use crate::document::{make_default_variation, new_root, renumber_in_place, Root, Variation};
use crate::validation::{self, ValidatedDocument, ValidationError, ValidationErrors, ValidationOptions};

pub use watcher::{check_file, CheckOutcome, DocumentCheck, DocumentWatcher};

/// A file ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Why a document file could not be opened for rewriting.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Parts of the file did not match the document shape. Writing the
    /// repaired tree back would replace or drop those values.
    #[error("document needs repair before it can be rewritten: {0}")]
    NeedsRepair(ValidationErrors),
}

/// The document being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    root: Root,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    /// Start from the baseline document with a blank registration.
    pub fn new() -> Self {
        Self::from_root(new_root(""))
    }

    pub fn from_root(root: Root) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Root {
        &mut self.root
    }

    pub fn into_root(self) -> Root {
        self.root
    }

    pub fn set_registration(&mut self, registration: impl Into<String>) {
        self.root.registration = registration.into();
    }

    pub fn variation(&self, index: usize) -> Option<&Variation> {
        self.root.variations().get(index)
    }

    pub fn variation_mut(&mut self, index: usize) -> Option<&mut Variation> {
        self.root.variations.as_mut()?.get_mut(index)
    }

    fn variations_mut(&mut self) -> &mut Vec<Variation> {
        self.root.variations.get_or_insert_with(Vec::new)
    }

    /// Append a baseline variation. Returns its id.
    pub fn add_variation(&mut self) -> u32 {
        let variations = self.variations_mut();
        variations.push(make_default_variation(0));
        renumber_in_place(variations);
        let id = variations.len() as u32;
        tracing::info!(id, "Variation added");
        id
    }

    /// Insert a copy of the variation at `index` right after it.
    ///
    /// The copy is never marked default. Returns its id.
    pub fn duplicate_variation(&mut self, index: usize) -> Option<u32> {
        let variations = self.root.variations.as_mut()?;
        let mut copy = variations.get(index)?.clone();
        copy.is_default = None;
        variations.insert(index + 1, copy);
        renumber_in_place(variations);

        let id = index as u32 + 2;
        tracing::info!(from = index + 1, id, "Variation duplicated");
        Some(id)
    }

    pub fn remove_variation(&mut self, index: usize) -> Option<Variation> {
        let variations = self.root.variations.as_mut()?;
        if index >= variations.len() {
            return None;
        }
        let removed = variations.remove(index);
        renumber_in_place(variations);

        tracing::info!(index, remaining = variations.len(), "Variation removed");
        Some(removed)
    }

    /// Move the variation at `from` so it ends up at `to`.
    pub fn move_variation(&mut self, from: usize, to: usize) -> bool {
        let Some(variations) = self.root.variations.as_mut() else {
            return false;
        };
        if from >= variations.len() || to >= variations.len() {
            return false;
        }
        let moved = variations.remove(from);
        variations.insert(to, moved);
        renumber_in_place(variations);

        tracing::info!(from, to, "Variation moved");
        true
    }

    /// Mark the variation at `index` as the default and clear the flag elsewhere.
    pub fn set_default_variation(&mut self, index: usize) -> bool {
        let Some(variations) = self.root.variations.as_mut() else {
            return false;
        };
        if index >= variations.len() {
            return false;
        }
        for (i, variation) in variations.iter_mut().enumerate() {
            variation.is_default = (i == index).then_some(true);
        }
        true
    }

    /// Replace the document with the one in `text`.
    ///
    /// On a parse error the current document is kept. Otherwise the structural
    /// findings are returned; the imported document may still need fixing.
    pub fn import(&mut self, text: &str) -> Result<Vec<ValidationError>, ParseError> {
        let (root, findings) = codec::deserialize(text)?.into_parts();
        tracing::info!(
            registration = %root.registration,
            findings = findings.len(),
            "Document replaced by import"
        );
        self.root = root;
        Ok(findings)
    }

    /// Open a document file that is going to be written back.
    ///
    /// Fails with [`OpenError::NeedsRepair`] when the file has structural
    /// findings, unless `allow_repair` is set.
    pub fn open(path: &Path, allow_repair: bool) -> Result<Self, OpenError> {
        let bytes = fs::read(path)?;
        let (root, findings) = codec::deserialize_bytes(&bytes)?.into_parts();

        if !findings.is_empty() {
            if !allow_repair {
                return Err(OpenError::NeedsRepair(findings.into()));
            }
            tracing::warn!(
                path = ?path,
                findings = findings.len(),
                "Opening document with repaired values"
            );
        }
        Ok(Self::from_root(root))
    }

    pub fn export(&self, settings: &ExportSettings) -> ExportArtifact {
        let contents = if settings.pretty {
            codec::serialize(&self.root)
        } else {
            codec::serialize_compact(&self.root)
        };
        let file_name = suggested_file_name(&self.root, &settings.fallback_name);

        tracing::info!(file_name = %file_name, bytes = contents.len(), "Document exported");
        ExportArtifact {
            file_name,
            contents,
        }
    }

    /// Validate a snapshot of the current document.
    pub fn validate(
        &self,
        options: &ValidationOptions,
    ) -> Result<ValidatedDocument, ValidationErrors> {
        validation::validate_with(self.root.clone(), options)
    }
}

/// `<registration>.json`, or `<fallback>.json` when the registration is blank.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`.
pub fn suggested_file_name(root: &Root, fallback: &str) -> String {
    let registration = root.registration.trim();
    let stem = if registration.is_empty() {
        fallback
    } else {
        registration
    };
    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.json", stem)
}
