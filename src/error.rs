//! Diagnostics produced while lexing and parsing.

use thiserror::Error;

use crate::position::Position;

/// The category of an [`Error`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The lexer encountered a character outside the recognised set.
    #[error("Illegal Character")]
    IllegalCharacter,
    /// The parser encountered a token sequence that does not match the grammar.
    #[error("Invalid Syntax Error")]
    InvalidSyntax,
    /// The parser exceeded its maximum nesting depth.
    #[error("Nesting Limit Exceeded")]
    NestingLimit,
    /// Reserved for evaluation. The lexer only reports it if it loses track of its own
    /// position history.
    #[error("Runtime Error")]
    Runtime,
}

/// An error spanning some region of the source.
///
/// The [`Display`](std::fmt::Display) implementation produces the two-line form
/// `<kind> : <details>` followed by `File <name> : Line <line>`, with a 1-based line number
/// taken from the end of the span.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind} : {details}\nFile {} : Line {}", .start.name(), .end.line() + 1)]
pub struct Error {
    /// The start of the offending region.
    pub start: Position,
    /// The end of the offending region.
    pub end: Position,
    /// What went wrong.
    pub kind: ErrorKind,
    /// A human-readable description.
    pub details: String,
}

impl Error {
    /// Constructs a new [`Error`].
    pub fn new(start: Position, end: Position, kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind,
            details: details.into(),
        }
    }

    /// Constructs an [`ErrorKind::IllegalCharacter`] error for `ch`.
    pub fn illegal_character(start: Position, end: Position, ch: char) -> Self {
        Self::new(start, end, ErrorKind::IllegalCharacter, format!("'{ch}'"))
    }

    /// Constructs an [`ErrorKind::InvalidSyntax`] error.
    pub fn invalid_syntax(start: Position, end: Position, details: impl Into<String>) -> Self {
        Self::new(start, end, ErrorKind::InvalidSyntax, details)
    }

    /// Constructs an [`ErrorKind::Runtime`] error.
    pub fn runtime(start: Position, end: Position, details: impl Into<String>) -> Self {
        Self::new(start, end, ErrorKind::Runtime, details)
    }

    /// Constructs an [`ErrorKind::NestingLimit`] error for a parser limited to `max_depth`.
    pub fn nesting_limit(start: Position, end: Position, max_depth: usize) -> Self {
        Self::new(
            start,
            end,
            ErrorKind::NestingLimit,
            format!("Maximum nesting depth of {max_depth} exceeded"),
        )
    }
}
