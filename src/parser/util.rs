//! Common functionality for the [`crate::parser`] submodules.

use crate::{ast::Node, lexer::token::TokenType};

use super::{Input, ParseResult};

/// Parses one or more `operand`s separated by any of the operators in `ops`, folding them into
/// a left-deepening chain of [`Node::BinOp`]s.
///
/// A single operand with no following operator is returned unchanged.
pub(super) fn bin_op<'t, F>(
    input: &Input<'t>,
    cursor: usize,
    depth: usize,
    operand: F,
    ops: &[TokenType],
) -> ParseResult<Node>
where
    F: Fn(&Input<'t>, usize, usize) -> ParseResult<Node>,
{
    let (mut cursor, mut left) = operand(input, cursor, depth)?;

    while input.peek(cursor).is_any(ops) {
        let op = input.peek(cursor).clone();
        let (next, right) = operand(input, cursor + 1, depth)?;
        left = Node::binary(left, op, right);
        cursor = next;
    }

    Ok((cursor, left))
}

#[cfg(test)]
mod tests {
    use crate::lexer::token::Tokens;

    use super::*;

    /// Parses exactly one number token at `cursor`.
    fn number<'t>(input: &Input<'t>, cursor: usize, _depth: usize) -> ParseResult<Node> {
        let tok = input.peek(cursor);
        assert!(tok.is_any(&[TokenType::Int, TokenType::Float]));
        Ok((cursor + 1, Node::Number(tok.clone())))
    }

    fn input(tokens: &Tokens) -> Input<'_> {
        Input {
            tokens: tokens.as_slice(),
            eof: tokens.eof(),
            max_depth: 0,
        }
    }

    #[test]
    fn bin_op_folds_to_the_left() {
        let tokens = Tokens::try_from("1 * 2 / 3").unwrap();
        let (cursor, node) =
            bin_op(&input(&tokens), 0, 0, number, &[TokenType::Mul, TokenType::Div]).unwrap();

        assert_eq!(cursor, 5);
        assert_eq!(node.to_string(), "((INT : 1, MUL, INT : 2), DIV, INT : 3)");
    }

    #[test]
    fn bin_op_stops_at_foreign_operators() {
        let tokens = Tokens::try_from("1 * 2 + 3").unwrap();
        let (cursor, node) = bin_op(&input(&tokens), 0, 0, number, &[TokenType::Mul]).unwrap();

        assert_eq!(cursor, 3);
        assert_eq!(tokens.as_slice()[cursor].kind, TokenType::Plus);
        assert_eq!(node.to_string(), "(INT : 1, MUL, INT : 2)");
    }

    #[test]
    fn bin_op_passes_single_operands_through() {
        let tokens = Tokens::try_from("42").unwrap();
        let (cursor, node) = bin_op(&input(&tokens), 0, 0, number, &[TokenType::Plus]).unwrap();

        assert_eq!(cursor, 1);
        assert_eq!(node.to_string(), "INT : 42");
    }
}
