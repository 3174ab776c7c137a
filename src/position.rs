//! Source positions and the single-step rollback cursor used by the lexer.
//!
//! A [`Position`] is cheap to [`Clone`]: the source name and text live behind a shared [`Arc`],
//! and the remaining state is a handful of integers. Every [`Token`](crate::lexer::token::Token)
//! and [`Error`](crate::error::Error) carries its own snapshot of a [`Position`], so diagnostics
//! can always name the source they came from.
//!
//! # Rollback
//! Each call to [`Position::advance`] remembers the state immediately before it, and
//! [`Position::back`] returns that state. Only one level of history is kept: the snapshot
//! returned by [`Position::back`] has no history of its own, so a second consecutive rollback
//! fails with a [`RollbackError`] instead of silently producing stale state.

use std::{fmt::Display, sync::Arc};

use thiserror::Error;

/// The error produced when [`Position::back`] is called without a retained snapshot.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot roll back position {index}: no previous state is retained")]
pub struct RollbackError {
    /// The index of the position that could not be rolled back.
    pub index: usize,
}

/// The named text that a [`Position`] points into.
#[derive(Debug, PartialEq, Eq)]
struct Source {
    /// The name used in diagnostics, e.g. `<stdin>`.
    name: String,
    /// The full source text.
    text: String,
}

/// The counters that describe how much of a source has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
    /// The number of characters consumed.
    index: usize,
    /// The number of bytes consumed.
    offset: usize,
    /// The 0-based line number.
    line: usize,
    /// The 0-based column number.
    column: usize,
}

/// A location in some named source text.
#[derive(Debug, Clone)]
pub struct Position {
    /// The current location.
    cursor: Cursor,
    /// The location immediately before the last [`Position::advance`], if any.
    prev: Option<Cursor>,
    /// The source being tracked.
    source: Arc<Source>,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cursor == other.cursor && self.source.name == other.source.name
    }
}

impl Eq for Position {}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source.name,
            self.cursor.line + 1,
            self.cursor.column + 1
        )
    }
}

impl Position {
    /// Returns a [`Position`] at the very start of `text`.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::default(),
            prev: None,
            source: Arc::new(Source {
                name: name.into(),
                text: text.into(),
            }),
        }
    }

    /// Moves `self` forward past `current_char`, remembering the state before the move.
    ///
    /// Passing `'\n'` starts a new line; passing `None` (i.e. advancing past the end of the
    /// source) moves forward by a single column.
    pub fn advance(&mut self, current_char: Option<char>) -> &mut Self {
        self.prev = Some(self.cursor);
        self.cursor.index += 1;
        self.cursor.offset += current_char.map_or(1, char::len_utf8);

        if current_char == Some('\n') {
            self.cursor.line += 1;
            self.cursor.column = 0;
        } else {
            self.cursor.column += 1;
        }

        self
    }

    /// Returns the state of `self` immediately before the last [`Position::advance`].
    ///
    /// The returned snapshot retains no history, so rolling it back again is an error.
    pub fn back(&self) -> Result<Position, RollbackError> {
        match self.prev {
            Some(cursor) => Ok(Self {
                cursor,
                prev: None,
                source: Arc::clone(&self.source),
            }),
            None => Err(RollbackError {
                index: self.cursor.index,
            }),
        }
    }

    /// Returns an independent snapshot of `self` with no rollback history.
    pub fn copy(&self) -> Position {
        Self {
            cursor: self.cursor,
            prev: None,
            source: Arc::clone(&self.source),
        }
    }

    /// Returns a snapshot of `self` advanced past `current_char`.
    pub fn advanced(&self, current_char: Option<char>) -> Position {
        let mut next = self.copy();
        next.advance(current_char);
        next.prev = None;
        next
    }

    /// The number of characters consumed.
    pub fn index(&self) -> usize {
        self.cursor.index
    }

    /// The 0-based line number.
    pub fn line(&self) -> usize {
        self.cursor.line
    }

    /// The 0-based column number.
    pub fn column(&self) -> usize {
        self.cursor.column
    }

    /// The name of the tracked source.
    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// The full text of the tracked source.
    pub fn text(&self) -> &str {
        &self.source.text
    }

    /// The character at `self`, or `None` if `self` is at or past the end of the source.
    pub fn current_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The unconsumed suffix of the source text.
    pub fn remaining(&self) -> &str {
        self.source.text.get(self.cursor.offset..).unwrap_or("")
    }
}
