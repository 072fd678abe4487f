use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::{op::Precedence, Sub},
    Parser,
};
use std::ops::Range;

/// A unary negation, such as `-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    /// The operand of the negation.
    pub operand: Box<Expr>,

    /// The span of the `-` token.
    pub op_span: Range<usize>,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a negation if the next token is `-`, or a primary expression otherwise.
    ///
    /// Negation binds tighter than multiplication but looser than exponentiation, so after the
    /// operand is parsed, any `^` that follows is folded into it: `-x^2` is `-(x^2)`, while
    /// `-x*y` is `(-x)*y`.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let Ok(op) = input.try_parse::<Sub>() else {
            return input.try_parse::<super::Primary>().map(Expr::from);
        };

        let operand = Self::parse_or_lower(input)?;
        let operand = Binary::parse_expr(input, operand, Precedence::Neg)?;
        let span = op.span.start..operand.span().end;
        Ok(Expr::Unary(Self {
            operand: Box::new(operand),
            op_span: op.span,
            span,
        }))
    }
}
