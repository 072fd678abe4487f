use crate::{
    parser::{
        ast::{binary::Binary, call::Call, literal::Literal, paren::Paren, unary::Unary},
        error::{kind, Error},
        token::op::Precedence,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Represents any kind of expression the parser understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `sin(x)`.
    Call(Call),

    /// A unary negation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

/// Represents a primary expression: one that binds tighter than any operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primary {
    Literal(Literal),
    Paren(Paren),
    Call(Call),
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(call) = input.try_parse::<Call>() {
            return Ok(Primary::Call(call));
        }

        // a call whose argument list is malformed must report that error, rather than being
        // reparsed as a bare symbol followed by garbage
        if input.is_call_start() {
            return input.try_parse::<Call>().map(Primary::Call);
        }

        if let Ok(literal) = input.try_parse::<Literal>() {
            return Ok(Primary::Literal(literal));
        }

        if input.peek_kind() == Some(TokenKind::OpenParen) {
            return input.try_parse::<Paren>().map(Primary::Paren);
        }

        let token = input.next_token()?;
        match token.kind {
            TokenKind::Unknown => Err(Error::new(vec![token.span], kind::UnknownCharacter {
                character: token.lexeme.to_owned(),
            })),
            found => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::Int, TokenKind::Name, TokenKind::OpenParen, TokenKind::Sub],
                found,
            })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
