use crate::{
    parser::{error::{kind, Error}, token::{Int, Name}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// An integer literal, such as `16`. The value is kept as written, so that arbitrarily large
/// integers survive until they are converted into an arbitrary-precision integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitInt {
    /// The digits of the literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Int { lexeme, span } = input.try_parse()?;
        Ok(Self { value: lexeme, span })
    }
}

/// A symbol / identifier literal, such as `x` or `sin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Name { lexeme, span } = input.try_parse()?;
        Ok(Self { name: lexeme, span })
    }
}

/// An integer or a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Integer(LitInt),
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.peek_kind() {
            Some(TokenKind::Int) => input.try_parse().map(Literal::Integer),
            Some(TokenKind::Name) => input.try_parse().map(Literal::Symbol),
            _ => {
                let token = input.next_token()?;
                Err(Error::new(vec![token.span], kind::UnexpectedToken {
                    expected: &[TokenKind::Int, TokenKind::Name],
                    found: token.kind,
                }))
            },
        }
    }
}
