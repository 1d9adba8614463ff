//! Interchange codec.
//!
//! # Data Flow
//! ```text
//! import:  bytes → UTF-8 check → JSON syntax → structure check/repair → Root
//!                                                    │
//!                                                    └─▶ structural findings
//! export:  Root → pretty JSON text (never fails)
//! ```
//!
//! # Design Decisions
//! - Parse errors are only about syntax and encoding; a well-formed but
//!   invalid document still imports so it can be corrected
//! - A failed parse produces nothing; callers keep their previous document
//! - Structural findings stay attached to the imported document until
//!   `Imported::validate` folds them into the report
//! - Export writes every table as a row array

pub mod error;
pub mod json;

pub use error::ParseError;
pub use json::{deserialize, deserialize_bytes, serialize, serialize_compact, Imported};
