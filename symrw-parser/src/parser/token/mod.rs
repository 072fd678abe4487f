pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Consumes the next token if its kind is one of `expected`, returning its lexeme and span.
fn expect(input: &mut Parser, expected: &'static [TokenKind]) -> Result<(String, Range<usize>), Error> {
    let token = input.next_token()?;
    if !expected.contains(&token.kind) {
        return Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected,
            found: token.kind,
        }));
    }
    Ok((token.lexeme.to_owned(), token.span))
}

/// Declares a type for each single-kind token, so that the parser can request that token with
/// [`Parser::try_parse`].
macro_rules! single_tokens {
    ($($(#[$doc:meta])* $name:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name {
                pub(crate) lexeme: String,
                pub(crate) span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let (lexeme, span) = expect(input, &[TokenKind::$name])?;
                    Ok(Self { lexeme, span })
                }
            }
        )*
    };
}

single_tokens! {
    /// `-` in prefix position.
    Sub,
    /// An identifier.
    Name,
    /// An unsigned integer literal.
    Int,
    Comma,
    OpenParen,
    CloseParen,
}
