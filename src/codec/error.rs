//! Import failures.

use thiserror::Error;

/// Why a text blob could not be read as a document at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not well-formed JSON.
    #[error("syntax error: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The bytes are not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte {offset}")]
    Encoding { offset: usize },

    /// The repaired tree still could not be typed.
    #[error("document could not be represented: {0}")]
    Unrepresentable(String),
}

impl ParseError {
    /// Metrics label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax_error",
            Self::Encoding { .. } => "encoding_error",
            Self::Unrepresentable(_) => "unrepresentable",
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() || err.is_io() {
            ParseError::Syntax {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            }
        } else {
            ParseError::Unrepresentable(err.to_string())
        }
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        ParseError::Encoding {
            offset: err.valid_up_to(),
        }
    }
}
