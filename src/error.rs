//! Error types for SDF parsing and emission.

use thiserror::Error;

use crate::base::Position;

/// Token text reported when a production runs past the last token.
pub const END_OF_INPUT: &str = "end of input";

/// Errors that abort a `parse` or `emit` call.
///
/// None of these are recoverable: a failed parse produces no model at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A character no token rule accepts.
    #[error("illegal character '{ch}' at line {line}, column {column}")]
    Lex { ch: char, line: u32, column: u32 },

    /// A token the current grammar production does not accept.
    #[error("syntax error at '{token}' line: {line}")]
    Parse { token: String, line: u32 },

    /// Well-formed syntax with meaningless content (bad arity, bad timescale,
    /// entry name collision, or a model the writer cannot express).
    #[error("{reason} ({context})")]
    Semantic { reason: String, context: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a lexical error at the given position.
    pub fn lex(ch: char, position: Position) -> Self {
        Self::Lex {
            ch,
            line: position.line,
            column: position.column,
        }
    }

    /// Create a syntax error for the offending token text.
    pub fn parse_at(token: impl Into<String>, line: u32) -> Self {
        Self::Parse {
            token: token.into(),
            line,
        }
    }

    /// Create a semantic error.
    pub fn semantic(reason: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Semantic {
            reason: reason.into(),
            context: context.into(),
        }
    }

    /// Line number the error refers to, when it has one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Lex { line, .. } | Self::Parse { line, .. } => Some(*line),
            Self::Semantic { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_message() {
        let err = Error::lex('$', Position::new(3, 14));
        assert_eq!(
            err.to_string(),
            "illegal character '$' at line 3, column 14"
        );
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_parse_error_message() {
        let err = Error::parse_at("IOPATH", 12);
        assert_eq!(err.to_string(), "syntax error at 'IOPATH' line: 12");
    }

    #[test]
    fn test_semantic_error_message() {
        let err = Error::semantic("delval list has 4 values", "IOPATH at line 7");
        assert_eq!(err.to_string(), "delval list has 4 values (IOPATH at line 7)");
        assert_eq!(err.line(), None);
    }
}
