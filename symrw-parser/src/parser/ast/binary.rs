use crate::parser::{
    ast::{expr::Expr, unary::Unary},
    error::Error,
    token::op::{Associativity, BinOp, Precedence},
    Parser,
};
use std::ops::Range;

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`, then the right-hand-side `2`. Before building the node, we check
    /// whether the operator after `2` binds tighter than `+`. It does, so the expression starting
    /// at `2` is parsed first, giving `2 * 3` as the right-hand-side of `1 +`.
    ///
    /// If it does not (such as in `3 * 2 + 1`), the node `3 * 2` is built right away, and
    /// [`Self::parse_expr`] picks up the `+ 1` afterwards.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        while let Some(next_op) = input.peek::<BinOp>() {
            if next_op.precedence() > precedence || next_op.associativity() == Associativity::Right {
                // `^` is right associative, so `2 ^ 3 ^ 4` must become `2 ^ (3 ^ 4)`
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
            } else {
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there is a binary operator of at least the given precedence, and a right-hand-side.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = input.peek::<BinOp>() {
            if op.precedence() < precedence {
                break;
            }

            input.try_parse::<BinOp>()?;
            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}
