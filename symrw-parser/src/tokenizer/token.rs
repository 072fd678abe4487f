use logos::Logos;
use std::{fmt, ops::Range};

/// The kinds of tokens in the expression language.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Mod,

    #[token("^")]
    Exp,

    #[regex(r"[a-zA-Z_]+")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// Any character the language does not use.
    #[regex(r".", priority = 0)]
    Unknown,
}

impl TokenKind {
    /// Returns true if the parser should look past tokens of this kind.
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace
    }
}

/// Describes the token kind the way it would be written, for error messages.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Add => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Mod => "`%`",
            TokenKind::Exp => "`^`",
            TokenKind::Name => "a name",
            TokenKind::Int => "an integer",
            TokenKind::Comma => "`,`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Unknown => "an unknown character",
        };
        f.write_str(text)
    }
}

/// A token, borrowing its lexeme from the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    pub span: Range<usize>,
    pub kind: TokenKind,
    pub lexeme: &'source str,
}
