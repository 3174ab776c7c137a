//! The command-line interface for `hinglish`.
//!
//! Usage (as with any other [`argh`] interface) involves first invoking [`argh::from_env()`], and
//! then processing the resulting data (in this case an instance of [`Cli`]).

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{BufRead, Write};

use argh::FromArgs;

use crate::{lexer::token::Tokens, parser::Parser};

/// The prompt printed before each line read by the [`Repl`].
pub const PROMPT: &str = "Hinglish > ";

/// The source name used for text read from standard input.
pub const STDIN: &str = "<stdin>";

/// Lex and parse Hinglish arithmetic expressions.
#[derive(Debug, Clone, FromArgs, PartialEq)]
pub struct Cli {
    #[argh(subcommand)]
    cmd: CliSubCommand,
}

impl Cli {
    /// Consumes `self` and processes the given subcommand against the process's standard
    /// streams.
    pub fn handle(self) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout().lock();

        match self.cmd {
            CliSubCommand::Repl(repl) => repl.run(&mut std::io::stdin().lock(), &mut stdout),
            CliSubCommand::Parse(parse) => parse.run(&mut stdout),
            CliSubCommand::Lex(lex) => lex.run(&mut stdout),
        }
    }
}

/// The set of the distinct subcommands available to be passed to the [`Cli`].
#[derive(Debug, Clone, FromArgs, PartialEq)]
#[argh(subcommand)]
enum CliSubCommand {
    Repl(Repl),
    Parse(Parse),
    Lex(Lex),
}

/// Reads expressions line by line, printing each parse tree or the error that prevented it.
#[derive(Debug, Clone, FromArgs, PartialEq)]
#[argh(subcommand, name = "repl")]
pub struct Repl {
    /// the deepest nesting of parentheses and signs to accept
    #[argh(option, default = "Parser::DEFAULT_MAX_DEPTH")]
    max_depth: usize,
}

impl Repl {
    /// Prompts on `output` and parses lines from `input` until it is exhausted.
    ///
    /// Errors are printed rather than returned; only I/O failures end the loop early.
    pub fn run<R, W>(&self, input: &mut R, output: &mut W) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let parser = Parser::with_max_depth(self.max_depth);
        let mut line = String::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(());
            }

            let text = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            match crate::run_with(STDIN, text, &parser) {
                Ok(ast) => writeln!(output, "{ast}")?,
                Err(err) => writeln!(output, "{err}")?,
            }
        }
    }
}

/// Parses a single expression and prints its tree.
#[derive(Debug, Clone, FromArgs, PartialEq)]
#[argh(subcommand, name = "parse")]
pub struct Parse {
    /// the name to report in diagnostics (defaults to <stdin>)
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// the deepest nesting of parentheses and signs to accept
    #[argh(option, default = "Parser::DEFAULT_MAX_DEPTH")]
    max_depth: usize,

    /// the expression to parse
    #[argh(positional)]
    expr: String,
}

impl Parse {
    /// Parses `self.expr`, writing the tree to `output` or returning the parse error.
    pub fn run<W: Write>(self, output: &mut W) -> anyhow::Result<()> {
        let name = self.name.as_deref().unwrap_or(STDIN);
        let ast = crate::run_with(name, &self.expr, &Parser::with_max_depth(self.max_depth))?;
        writeln!(output, "{ast}")?;
        Ok(())
    }
}

/// Lexes a single expression and prints its tokens, one per line.
#[derive(Debug, Clone, FromArgs, PartialEq)]
#[argh(subcommand, name = "lex")]
pub struct Lex {
    /// the name to report in diagnostics (defaults to <stdin>)
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// the expression to lex
    #[argh(positional)]
    expr: String,
}

impl Lex {
    /// Lexes `self.expr`, writing each token and its position to `output`.
    pub fn run<W: Write>(self, output: &mut W) -> anyhow::Result<()> {
        let name = self.name.as_deref().unwrap_or(STDIN);
        let tokens = Tokens::lex(name, &self.expr)?;

        for token in &tokens {
            writeln!(output, "{}\t{}", token.start, token)?;
        }

        Ok(())
    }
}
