//! The `expr`, `term` and `factor` rules.

use tracing::trace;

use crate::{ast::Node, lexer::token::TokenType};

use super::{util::bin_op, Input, ParseResult};

/// Parses a sum or difference of [`term`]s.
pub(super) fn expr(input: &Input<'_>, cursor: usize, depth: usize) -> ParseResult<Node> {
    bin_op(input, cursor, depth, term, &[TokenType::Plus, TokenType::Minus])
}

/// Parses a product or quotient of [`factor`]s.
fn term(input: &Input<'_>, cursor: usize, depth: usize) -> ParseResult<Node> {
    bin_op(input, cursor, depth, factor, &[TokenType::Mul, TokenType::Div])
}

/// Parses a factor, where a factor is one of
/// - a signed factor;
/// - an integer or float literal;
/// - a parenthesised [`expr`].
fn factor(input: &Input<'_>, cursor: usize, depth: usize) -> ParseResult<Node> {
    let tok = input.peek(cursor);
    trace!(target: "parser", token = %tok, cursor, depth, "factor");

    match tok.kind {
        TokenType::Plus | TokenType::Minus => {
            let depth = input.descend(tok, depth)?;
            let (cursor, operand) = factor(input, cursor + 1, depth)?;
            Ok((cursor, Node::unary(tok.clone(), operand)))
        }
        TokenType::Int | TokenType::Float => Ok((cursor + 1, Node::Number(tok.clone()))),
        TokenType::LParen => {
            let depth = input.descend(tok, depth)?;
            let (cursor, inner) = expr(input, cursor + 1, depth)?;
            let close = input.peek(cursor);

            match close.kind {
                TokenType::RParen => Ok((cursor + 1, inner)),
                _ => Err(input.syntax_error(close, "Expected ')'")),
            }
        }
        _ => Err(input.syntax_error(tok, "Expected int or Float")),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::{error::ErrorKind, lexer::token::Tokens};

    use super::*;

    fn input(tokens: &Tokens) -> Input<'_> {
        Input {
            tokens: tokens.as_slice(),
            eof: tokens.eof(),
            max_depth: 8,
        }
    }

    #[test]
    fn check_factor_parser() {
        let tokens = Tokens::try_from("-(1) * 2").unwrap();
        let (cursor, node) = factor(&input(&tokens), 0, 0).unwrap();
        dbg!(cursor, &node);

        assert_eq!(cursor, 4);
        assert_eq!(node.to_string(), "(MINUS, INT : 1)");
    }

    #[test]
    fn check_term_parser() {
        let tokens = Tokens::try_from("2 * 3 + 4").unwrap();
        let (cursor, node) = term(&input(&tokens), 0, 0).unwrap();

        assert_eq!(cursor, 3);
        assert_eq!(node.to_string(), "(INT : 2, MUL, INT : 3)");
    }

    #[test]
    fn check_expr_parser() {
        // we expect to get (7 + (13 * 6))
        let tokens = Tokens::try_from("7+13*6").unwrap();
        let (cursor, node) = expr(&input(&tokens), 0, 0).unwrap();
        assert_eq!(tokens.as_slice()[cursor].kind, TokenType::Eof);
        assert_eq!(node.to_string(), "(INT : 7, PLUS, (INT : 13, MUL, INT : 6))");

        // the parentheses override precedence, giving ((7 + 13) * 6)
        let tokens = Tokens::try_from("(7+13)*6").unwrap();
        let (_, node) = expr(&input(&tokens), 0, 0).unwrap();
        assert_eq!(node.to_string(), "((INT : 7, PLUS, INT : 13), MUL, INT : 6)");
    }

    #[test]
    fn factor_rejects_operators() {
        let tokens = Tokens::try_from("* 2").unwrap();
        let err = factor(&input(&tokens), 0, 0).unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidSyntax);
        assert_eq!(err.details, "Expected int or Float");
        assert_eq!(err.start.index(), 0);
    }

    #[test]
    fn factor_never_moves_past_eof() {
        let tokens = Tokens::try_from("").unwrap();
        let err = factor(&input(&tokens), 5, 0).unwrap_err();
        assert_eq!(err.details, "Expected int or Float");
        assert_eq!(err.start, tokens.eof().start);
    }
}
