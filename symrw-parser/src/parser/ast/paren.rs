use crate::parser::{
    ast::expr::Expr,
    error::{kind, Error},
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use std::ops::Range;

/// An expression wrapped in parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paren {
    pub expr: Box<Expr>,

    /// Covers both parentheses.
    pub span: Range<usize>,
}

impl Paren {
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Strips this and any directly nested parentheses, as in `((x))`.
    pub fn into_innermost(self) -> Expr {
        match *self.expr {
            Expr::Paren(inner) => inner.into_innermost(),
            expr => expr,
        }
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;
        let expr = input.try_parse::<Expr>()?;
        let close = input.try_parse::<CloseParen>().map_err(|err| {
            // running out of input means the `(` was never matched
            if input.peek_kind().is_none() {
                Error::new(vec![open.span.clone()], kind::UnclosedParenthesis)
            } else {
                err
            }
        })?;

        Ok(Self {
            expr: Box::new(expr),
            span: open.span.start..close.span.end,
        })
    }
}
