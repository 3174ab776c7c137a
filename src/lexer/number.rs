//! Numeric literal recognition.
//!
//! A literal is a maximal run of digits containing at most one decimal point, and must begin
//! with a digit. A second decimal point is never part of a literal; the lexer sees it as the
//! next character and rejects it.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1},
    combinator::{consumed, map_res, recognize},
    sequence::separated_pair,
    IResult, Parser,
};
use num_bigint::BigUint;
use num_traits::Num;

use super::token::Number;

/// Parses a numeric literal from the front of `input`, returning the consumed text alongside
/// its value.
pub fn number(input: &str) -> IResult<&str, (&str, Number)> {
    consumed(alt((float, int))).parse(input)
}

/// Parses a [`Number::Float`], i.e. digits, a decimal point, and optional trailing digits.
fn float(input: &str) -> IResult<&str, Number> {
    map_res(recognize(separated_pair(digit1, char('.'), digit0)), |s: &str| {
        s.parse::<f64>().map(Number::Float)
    })
    .parse(input)
}

/// Parses a [`Number::Int`] from a run of decimal digits.
fn int(input: &str) -> IResult<&str, Number> {
    map_res(digit1, |s: &str| BigUint::from_str_radix(s, 10).map(Number::Int)).parse(input)
}
