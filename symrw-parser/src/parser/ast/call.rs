use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{CloseParen, Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// A function application, such as `sin(x)` or `f(a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The name of the function being applied.
    pub name: LitSym,

    /// The arguments, in order.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        let mut args = Vec::new();
        if let Some(close_paren) = input.peek::<CloseParen>() {
            input.try_parse::<CloseParen>()?;
            let span = name.span.start..close_paren.span.end;
            return Ok(Self {
                name,
                args,
                span,
                paren_span: open_paren.span.start..close_paren.span.end,
            });
        }

        loop {
            args.push(input.try_parse::<Expr>()?);

            if input.try_parse::<Comma>().is_ok() {
                continue;
            }

            match input.try_parse::<CloseParen>() {
                Ok(close_paren) => {
                    let span = name.span.start..close_paren.span.end;
                    return Ok(Self {
                        name,
                        args,
                        span,
                        paren_span: open_paren.span.start..close_paren.span.end,
                    });
                },
                Err(_) => {
                    // either the input ended, or something other than `,` or `)` follows an
                    // argument
                    return match input.peek_kind() {
                        None => Err(Error::new(vec![open_paren.span], kind::UnclosedParenthesis)),
                        Some(found) => Err(input.error(kind::UnexpectedToken {
                            expected: &[TokenKind::Comma, TokenKind::CloseParen],
                            found,
                        })),
                    };
                },
            }
        }
    }
}
