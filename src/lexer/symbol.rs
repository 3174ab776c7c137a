//! The single-character symbols of an expression.

use super::token::TokenType;

/// Returns the [`TokenType`] of the operator or punctuation `glyph`, if it is one.
pub fn glyph(glyph: char) -> Option<TokenType> {
    match glyph {
        '+' => Some(TokenType::Plus),
        '-' => Some(TokenType::Minus),
        '*' => Some(TokenType::Mul),
        '/' => Some(TokenType::Div),
        '^' => Some(TokenType::Pow),
        '(' => Some(TokenType::LParen),
        ')' => Some(TokenType::RParen),
        _ => None,
    }
}

/// Returns `true` iff `c` is skipped between tokens.
pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
