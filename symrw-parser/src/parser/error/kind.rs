use ariadne::Fmt;
use symrw_attrs::ErrorKind;
use symrw_error::EXPR;
use crate::tokenizer::TokenKind;

/// Joins token descriptions into `a, b or c`.
fn describe_alternatives(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init = init.iter().map(TokenKind::to_string).collect::<Vec<_>>();
            format!("{} or {}", init.join(", "), last)
        },
    }
}

/// The input ended in the middle of an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("an {} is missing here", "operand".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// A complete expression was parsed, but input remains after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = ["this is not part of the expression"],
    help = format!("to pass several arguments, write a {} such as `f(a, b)`", "call".fg(EXPR)),
)]
pub struct ExpectedEof;

/// A token that cannot appear at this position.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", found),
    labels = [format!("expected {}", describe_alternatives(expected))],
)]
pub struct UnexpectedToken {
    /// The token kinds that would have been accepted.
    pub expected: &'static [TokenKind],

    pub found: TokenKind,
}

/// A character that is not part of the expression language.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown character `{}`", character),
    labels = ["here"],
    help = format!("expressions are built from integers, names, {}, commas and parentheses", "+ - * / % ^".fg(EXPR)),
)]
pub struct UnknownCharacter {
    pub character: String,
}

/// A parenthesis that is never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["opened here"],
    help = "add a `)` after the enclosed expression",
)]
pub struct UnclosedParenthesis;
