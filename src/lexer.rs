//! A character-by-character lexer for arithmetic expressions.
//!
//! The [`Lexer`] walks the source with a [`Position`], so that every [`Token`] it emits carries
//! an exact source span. Spaces and tabs are skipped; every other character must either be one
//! of the [`symbol::glyph`]s or begin a [`number::number`] literal, and anything else fails the
//! entire lex with an [`ErrorKind::IllegalCharacter`](crate::error::ErrorKind) error.

use tracing::{debug, instrument, trace};

use crate::{error::Error, position::Position};

use token::{Token, TokenType, Tokens};

pub mod number;
pub mod symbol;
pub mod token;

/// A single-use lexer over some named source text.
#[derive(Debug, Clone)]
pub struct Lexer {
    /// The position of the current character.
    position: Position,
}

impl Lexer {
    /// Constructs a [`Lexer`] positioned at the start of `text`.
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            position: Position::new(name, text),
        }
    }

    /// The character under the cursor, or `None` at the end of the source.
    fn current_char(&self) -> Option<char> {
        self.position.current_char()
    }

    /// Moves the cursor past the current character.
    fn advance(&mut self) {
        let current = self.current_char();
        self.position.advance(current);
    }

    /// Consumes `self` and produces the complete token stream, ending in an EOF token.
    #[instrument(level = "debug", skip_all, fields(source = %self.position.name()))]
    pub fn make_tokens(mut self) -> Result<Tokens, Error> {
        let mut tokens = Vec::new();

        while let Some(current) = self.current_char() {
            if !symbol::is_blank(current) {
                if let Some(kind) = symbol::glyph(current) {
                    tokens.push(Token::new(kind, &self.position));
                } else if current.is_ascii_digit() {
                    let token = self.make_number(current)?;
                    // the literal scan stops one past its last character, so step back
                    // to keep the trailing advance below uniform across branches
                    self.position = self.position.back().map_err(|err| {
                        Error::runtime(token.start.clone(), token.end.clone(), err.to_string())
                    })?;
                    tokens.push(token);
                } else {
                    let start = self.position.copy();
                    self.advance();
                    let err = Error::illegal_character(start, self.position.copy(), current);
                    debug!(target: "lexer", %err, "rejected character");
                    return Err(err);
                }

                if let Some(token) = tokens.last() {
                    trace!(target: "lexer", %token, at = %token.start, "emitted token");
                }
            }

            self.advance();
        }

        let eof = Token::new(TokenType::Eof, &self.position);
        debug!(target: "lexer", count = tokens.len() + 1, "finished lexing");
        Ok(Tokens::terminate(tokens, eof))
    }

    /// Scans the numeric literal beginning with `first`, leaving the cursor one character
    /// past its end.
    fn make_number(&mut self, first: char) -> Result<Token, Error> {
        let start = self.position.copy();
        let (_, (literal, value)) = number::number(self.position.remaining()).map_err(|_| {
            Error::illegal_character(start.clone(), start.advanced(Some(first)), first)
        })?;
        let literal = literal.to_owned();

        for c in literal.chars() {
            self.position.advance(Some(c));
        }

        Ok(Token::number(value, start, self.position.copy()))
    }
}
