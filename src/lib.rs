//! A lexer and recursive-descent parser for Hinglish arithmetic expressions.
//!
//! Source text flows through two stages:
//! 1. the [`lexer`] turns it into an EOF-terminated stream of [`Token`](lexer::token::Token)s;
//! 2. the [`parser`] turns that stream into an [`Ast`].
//!
//! Both stages stop at the first problem they find and report it as an [`Error`], whose
//! [`Display`](std::fmt::Display) form names the source and the (1-based) line involved.
//!
//! ```
//! let ast = hinglish::run("<stdin>", "2 + 3 * 4").unwrap();
//! assert_eq!(ast.to_string(), "(INT : 2, PLUS, (INT : 3, MUL, INT : 4))");
//!
//! let err = hinglish::run("<stdin>", "2 +").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Invalid Syntax Error : Expected int or Float\nFile <stdin> : Line 1"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tracing::instrument;

extern crate static_assertions as sa;

pub mod ast;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod position;

pub use ast::Ast;
pub use error::{Error, ErrorKind};
pub use parser::Parser;

use lexer::token::Tokens;

sa::assert_impl_all!(position::Position: Send, Sync, Clone);
sa::assert_impl_all!(Tokens: Send, Sync);
sa::assert_impl_all!(Ast: Send, Sync);
sa::assert_impl_all!(Error: Send, Sync, std::error::Error);

/// Lexes and parses `text`, naming it `name` in any diagnostics.
pub fn run(name: &str, text: &str) -> Result<Ast, Error> {
    run_with(name, text, &Parser::default())
}

/// Lexes `text` and parses it with the given `parser`.
#[instrument(level = "debug", skip(text, parser))]
pub fn run_with(name: &str, text: &str, parser: &Parser) -> Result<Ast, Error> {
    let tokens = Tokens::lex(name, text)?;
    parser.parse(&tokens)
}
