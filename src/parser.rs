//! A recursive-descent parser operating on token streams.
//!
//! # Grammar
//! Operators are listed from lowest to highest precedence:
//!
//! ```raw
//! expr   ::= term ( ('+' | '-') term )*
//! term   ::= factor ( ('*' | '/') factor )*
//! factor ::=
//!       ('+' | '-') factor
//!     | INT
//!     | FLOAT
//!     | '(' expr ')'
//! ```
//!
//! The binary levels are parsed by [`util::bin_op`], which folds each level into a
//! left-deepening chain, so `a - b - c` parses as `(a - b) - c`. Unary signs recurse into
//! `factor` and therefore nest to the right, so `--x` parses as `-(-x)`.
//!
//! The lexer recognises `^`, but no rule consumes it; a `^` where an operator is expected
//! is reported as unsupported.
//!
//! # Cursors
//! Rules never mutate shared state. Each one takes the index of the token it should start at
//! and, on success, returns the index of the first token it did not consume. The cursor never
//! moves past the final EOF token.

use tracing::{debug, instrument};

use crate::{
    ast::Ast,
    error::Error,
    lexer::token::{Token, TokenType, Tokens},
};

mod expr;
mod util;

/// The return type of the parsing rules: the next cursor position and the parsed value.
type ParseResult<T> = Result<(usize, T), Error>;

/// A configurable expression parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    /// The deepest permitted nesting of parentheses and unary operators.
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    /// The nesting limit used by [`Parser::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Returns a [`Parser`] that rejects expressions nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The deepest permitted nesting of parentheses and unary operators.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses `tokens` as a single complete expression.
    #[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn parse(&self, tokens: &Tokens) -> Result<Ast, Error> {
        let input = Input {
            tokens: tokens.as_slice(),
            eof: tokens.eof(),
            max_depth: self.max_depth,
        };

        let result = expr::expr(&input, 0, 0).and_then(|(cursor, root)| {
            let next = input.peek(cursor);
            match next.kind {
                TokenType::Eof => Ok(Ast::from(root)),
                TokenType::Pow => {
                    Err(input.syntax_error(next, "Exponentiation '^' is not supported"))
                }
                _ => Err(input.syntax_error(next, "Expected '+' '-' '*' '/'")),
            }
        });

        if let Err(err) = &result {
            debug!(target: "parser", %err, "rejected token stream");
        }

        result
    }
}

/// The immutable state shared by every parsing rule.
#[derive(Debug, Clone, Copy)]
struct Input<'t> {
    /// The complete token stream.
    tokens: &'t [Token],
    /// The final token of the stream.
    eof: &'t Token,
    /// The deepest permitted nesting.
    max_depth: usize,
}

impl<'t> Input<'t> {
    /// Returns the token at `cursor`, or the EOF token if `cursor` is out of range.
    fn peek(&self, cursor: usize) -> &'t Token {
        self.tokens.get(cursor).unwrap_or(self.eof)
    }

    /// Constructs an [`ErrorKind::InvalidSyntax`](crate::error::ErrorKind) error
    /// spanning `token`.
    fn syntax_error(&self, token: &Token, details: &str) -> Error {
        Error::invalid_syntax(token.start.clone(), token.end.clone(), details)
    }

    /// Returns the depth one level below `depth`, or an error spanning `token` if that
    /// would exceed the nesting limit.
    fn descend(&self, token: &Token, depth: usize) -> Result<usize, Error> {
        if depth >= self.max_depth {
            Err(Error::nesting_limit(
                token.start.clone(),
                token.end.clone(),
                self.max_depth,
            ))
        } else {
            Ok(depth + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::ErrorKind;

    use super::*;

    /// Lexes and parses `source` with a default [`Parser`].
    fn parse(source: &str) -> Result<Ast, Error> {
        Parser::default().parse(&Tokens::try_from(source).unwrap())
    }

    #[test]
    fn check_precedence() {
        let ast = parse("2+3*4").unwrap();
        dbg!(&ast);
        assert_eq!(ast.to_string(), "(INT : 2, PLUS, (INT : 3, MUL, INT : 4))");

        let ast = parse("(2+3)*4").unwrap();
        assert_eq!(ast.to_string(), "((INT : 2, PLUS, INT : 3), MUL, INT : 4)");
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(
            parse("8 - 4 - 2").unwrap().to_string(),
            "((INT : 8, MINUS, INT : 4), MINUS, INT : 2)"
        );
        assert_eq!(
            parse("8 / 4 * 2").unwrap().to_string(),
            "((INT : 8, DIV, INT : 4), MUL, INT : 2)"
        );
    }

    #[test]
    fn unary_operators_nest_to_the_right() {
        assert_eq!(parse("--5").unwrap().to_string(), "(MINUS, (MINUS, INT : 5))");
        assert_eq!(
            parse("-+2.5 * 3").unwrap().to_string(),
            "((MINUS, (PLUS, FLOAT : 2.5)), MUL, INT : 3)"
        );
    }

    #[test]
    fn operator_sequence_is_preserved() {
        // factors paired with their rendering
        const FACTORS: [(&str, &str); 6] = [
            ("7", "INT : 7"),
            ("-2", "(MINUS, INT : 2)"),
            ("(3*4)", "(INT : 3, MUL, INT : 4)"),
            ("1.5", "FLOAT : 1.5"),
            ("+-8", "(PLUS, (MINUS, INT : 8))"),
            ("(1/2-3)", "((INT : 1, DIV, INT : 2), MINUS, INT : 3)"),
        ];

        for operands in 1..=6 {
            for mask in 0..(1usize << (operands - 1)) {
                let (first, rendered) = FACTORS[mask % FACTORS.len()];
                let mut source = first.to_owned();
                let mut expected = rendered.to_owned();

                for i in 1..operands {
                    let (symbol, name) = match (mask >> (i - 1)) & 1 {
                        0 => ('+', "PLUS"),
                        _ => ('-', "MINUS"),
                    };
                    let (factor, rendered) = FACTORS[(mask + i) % FACTORS.len()];
                    source = format!("{source} {symbol} {factor}");
                    expected = format!("({expected}, {name}, {rendered})");
                }

                let ast = parse(&source).unwrap();
                assert_eq!(ast.to_string(), expected, "parsing {source:?}");

                let ops: String = ast
                    .operators()
                    .into_iter()
                    .map(|tok| match tok.kind {
                        TokenType::Plus => '+',
                        TokenType::Minus => '-',
                        TokenType::Mul => '*',
                        TokenType::Div => '/',
                        other => panic!("unexpected operator {other}"),
                    })
                    .collect();
                let in_source: String = source.chars().filter(|c| "+-*/".contains(*c)).collect();
                assert_eq!(ops, in_source, "parsing {source:?}");
            }
        }
    }

    #[test]
    fn empty_input_expects_a_number() {
        for source in ["", "   ", "\t \t"] {
            let err = parse(source).unwrap_err();
            assert_matches!(err.kind, ErrorKind::InvalidSyntax);
            assert_eq!(err.details, "Expected int or Float");
            assert_eq!(err.start.index(), source.chars().count());
        }
    }

    #[test]
    fn dangling_operator_reports_the_eof_span() {
        let err = parse("2+").unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidSyntax);
        assert_eq!(err.details, "Expected int or Float");
        assert_eq!((err.start.column(), err.end.column()), (2, 3));
        assert_eq!(
            err.to_string(),
            "Invalid Syntax Error : Expected int or Float\nFile <stdin> : Line 1"
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse("2)").unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidSyntax);
        assert_eq!(err.details, "Expected '+' '-' '*' '/'");
        assert_eq!((err.start.column(), err.end.column()), (1, 2));

        let err = parse("1 2").unwrap_err();
        assert_eq!(err.details, "Expected '+' '-' '*' '/'");
    }

    #[test]
    fn exponentiation_is_unsupported() {
        let err = parse("3^2").unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidSyntax);
        assert_eq!(err.details, "Exponentiation '^' is not supported");
        assert_eq!(err.start.column(), 1);

        // in operand position it is just an unexpected token
        let err = parse("^2").unwrap_err();
        assert_eq!(err.details, "Expected int or Float");
    }

    #[test]
    fn unclosed_paren_is_rejected() {
        let err = parse("(1 + 2").unwrap_err();
        assert_matches!(err.kind, ErrorKind::InvalidSyntax);
        assert_eq!(err.details, "Expected ')'");
        assert_eq!(err.start.index(), 6);

        let err = parse("(1 2)").unwrap_err();
        assert_eq!(err.details, "Expected ')'");
        assert_eq!(err.start.index(), 3);
    }

    #[test]
    fn nesting_is_bounded() {
        let parser = Parser::with_max_depth(3);
        let tokens = Tokens::try_from("((-1))").unwrap();
        assert!(parser.parse(&tokens).is_ok());

        let tokens = Tokens::try_from("(((-1)))").unwrap();
        let err = parser.parse(&tokens).unwrap_err();
        assert_matches!(err.kind, ErrorKind::NestingLimit);
        assert_eq!(err.details, "Maximum nesting depth of 3 exceeded");
        // the offending token is the unary minus
        assert_eq!(err.start.index(), 3);
    }

    #[test]
    fn default_nesting_limit_rejects_crafted_input() {
        let depth = Parser::DEFAULT_MAX_DEPTH;
        let ok = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(parse(&ok).is_ok());

        let too_deep = format!("{}1{}", "(".repeat(depth + 1), ")".repeat(depth + 1));
        let err = parse(&too_deep).unwrap_err();
        assert_matches!(err.kind, ErrorKind::NestingLimit);
        assert_eq!(err.start.index(), depth);
    }

    #[test]
    fn parens_are_not_part_of_the_tree() {
        let ast = parse("((7))").unwrap();
        assert_eq!(ast.to_string(), "INT : 7");
        assert_eq!(ast.span().0.index(), 2);
    }
}
