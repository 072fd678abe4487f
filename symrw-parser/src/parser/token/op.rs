//! Binary operators and their precedence.

use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// How a chain of operators of equal precedence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,

    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

/// Binding strength, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Lower than every operator; used to start parsing a full expression.
    Any,

    /// `+` and `-`
    Term,

    /// `*`, `/` and `%`
    Factor,

    /// Prefix `-`
    Neg,

    /// `^`
    Exp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
}

impl BinOpKind {
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div | Self::Mod => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    pub fn associativity(self) -> Associativity {
        if self == Self::Exp {
            Associativity::Right
        } else {
            Associativity::Left
        }
    }

    /// The binary operator written as the given token, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Exp => Self::Exp,
            TokenKind::Mul => Self::Mul,
            TokenKind::Div => Self::Div,
            TokenKind::Mod => Self::Mod,
            TokenKind::Add => Self::Add,
            TokenKind::Sub => Self::Sub,
            _ => return None,
        })
    }
}

/// A binary operator and where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOp {
    pub kind: BinOpKind,
    pub span: Range<usize>,
}

impl BinOp {
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }

    pub fn associativity(&self) -> Associativity {
        self.kind.associativity()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match BinOpKind::from_token(token.kind) {
            Some(kind) => Ok(Self { kind, span: token.span }),
            None => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Add,
                    TokenKind::Sub,
                    TokenKind::Mul,
                    TokenKind::Div,
                    TokenKind::Mod,
                    TokenKind::Exp,
                ],
                found: token.kind,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        assert!(Precedence::Any < Precedence::Term);
        assert!(Precedence::Term < Precedence::Factor);
        assert!(Precedence::Factor < Precedence::Neg);
        assert!(Precedence::Neg < Precedence::Exp);
    }

    #[test]
    fn operator_tokens() {
        assert_eq!(BinOpKind::from_token(TokenKind::Mod), Some(BinOpKind::Mod));
        assert_eq!(BinOpKind::from_token(TokenKind::Comma), None);
    }

    #[test]
    fn only_exponentiation_is_right_associative() {
        for kind in [BinOpKind::Mul, BinOpKind::Div, BinOpKind::Mod, BinOpKind::Add, BinOpKind::Sub] {
            assert_eq!(kind.associativity(), Associativity::Left);
        }
        assert_eq!(BinOpKind::Exp.associativity(), Associativity::Right);
    }
}
