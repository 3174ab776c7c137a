//! Tokens and token streams.

use std::fmt::Display;

use num_bigint::BigUint;

use crate::{error::Error, position::Position};

/// The kind of a [`Token`].
///
/// The [`Display`] implementation produces the upper-case names used when rendering tokens,
/// e.g. `INT` or `LPAREN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// An integer literal.
    Int,
    /// A floating-point literal.
    Float,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// The end of the source.
    Eof,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Pow => "POW",
            Self::LParen => "LPAREN",
            Self::RParen => "RPAREN",
            Self::Eof => "EOF",
        })
    }
}

/// The payload of an [`TokenType::Int`] or [`TokenType::Float`] token.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An arbitrary-precision unsigned integer.
    Int(BigUint),
    /// A double-precision float.
    Float(f64),
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(int) => write!(f, "{int}"),
            Self::Float(float) => fmt_float(*float, f),
        }
    }
}

/// Writes the shortest representation of `float` that reads back as the same value.
///
/// Integral values keep a trailing `.0`. Magnitudes below `1e-4` or from `1e16` up are written
/// with an exponent, which always carries a sign and at least two digits (`1e+16`, `2.5e-07`).
fn fmt_float(float: f64, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // `Debug` already picks the shortest digits and switches to an exponent at those bounds
    let repr = format!("{float:?}");

    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&repr),
    }
}

/// A classified lexical unit with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenType,
    /// The numeric payload, present only for literals.
    pub value: Option<Number>,
    /// Where this token begins.
    pub start: Position,
    /// Where this token ends (exclusive).
    pub end: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} : {}", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Token {
    /// Constructs a token with no payload covering the single character at `start`.
    pub fn new(kind: TokenType, start: &Position) -> Self {
        Self {
            kind,
            value: None,
            start: start.copy(),
            end: start.advanced(None),
        }
    }

    /// Constructs a literal token spanning `start..end`.
    pub fn number(value: Number, start: Position, end: Position) -> Self {
        let kind = match value {
            Number::Int(_) => TokenType::Int,
            Number::Float(_) => TokenType::Float,
        };

        Self {
            kind,
            value: Some(value),
            start,
            end,
        }
    }

    /// Returns `true` iff `self` has any of the given `kinds`.
    pub fn is_any(&self, kinds: &[TokenType]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// An owned token stream, guaranteed to end in exactly one [`TokenType::Eof`] token.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokens {
    /// Every token, the EOF token included.
    tokens: Vec<Token>,
    /// A copy of the final token.
    eof: Token,
}

impl Tokens {
    /// Lexes the source `text` named `name` into a [`Tokens`].
    pub fn lex(name: &str, text: &str) -> Result<Self, Error> {
        super::Lexer::new(name, text).make_tokens()
    }

    /// Terminates `tokens` with `eof`.
    pub(super) fn terminate(mut tokens: Vec<Token>, eof: Token) -> Self {
        debug_assert_eq!(eof.kind, TokenType::Eof);
        tokens.push(eof.clone());
        Self { tokens, eof }
    }

    /// Returns the underlying tokens as a slice.
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the terminating [`TokenType::Eof`] token.
    pub fn eof(&self) -> &Token {
        &self.eof
    }

    /// Returns the number of tokens in `self`, including the final EOF.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`, since every stream carries an EOF token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consumes `self` and returns the underlying vector.
    pub fn into_inner(self) -> Vec<Token> {
        self.tokens
    }
}

impl AsRef<[Token]> for Tokens {
    fn as_ref(&self) -> &[Token] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl TryFrom<&str> for Tokens {
    type Error = Error;

    /// Lexes `value` under the source name `<stdin>`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::lex("<stdin>", value)
    }
}
