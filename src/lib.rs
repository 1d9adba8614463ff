//! Weight & balance configuration documents.
//!
//! Typed model, two-pass validator, JSON codec and editing session for the
//! per-registration configuration consumed by a load-sheet engine.

pub mod codec;
pub mod config;
pub mod document;
pub mod observability;
pub mod session;
pub mod validation;

pub use codec::{deserialize, serialize, Imported, ParseError};
pub use config::ToolConfig;
pub use document::{make_default_variation, new_root, renumber, Root, Variation};
pub use session::{EditSession, ExportArtifact, OpenError};
pub use validation::{validate, validate_with, ValidationError, ValidationErrors, ValidationOptions};
