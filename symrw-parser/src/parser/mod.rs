pub mod ast;
pub mod error;
pub mod token;

use error::{kind::{self, ExpectedEof}, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the expression language. This is the type to use to parse a piece of
/// source code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the next significant token, or the end of the source code
    /// if there is none.
    pub fn error(&self, kind: impl symrw_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.kind.is_trivia())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek_token().map(|token| token.kind)
    }

    /// Returns true if the next two significant tokens are a name and an opening parenthesis,
    /// i.e. a function call starts here.
    pub fn is_call_start(&self) -> bool {
        let mut significant = self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .filter(|token| !token.kind.is_trivia());
        matches!(
            (significant.next().map(|t| t.kind), significant.next().map(|t| t.kind)),
            (Some(TokenKind::Name), Some(TokenKind::OpenParen)),
        )
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                return Ok(token.clone());
            }
        }

        Err(Error::new(vec![self.eof_span()], kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. If parsing is successful,
    /// the stream is advanced past the consumed tokens and the parsed value is returned.
    /// Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses a value without consuming it. Returns [`None`] if the value cannot be parsed here.
    pub fn peek<T: Parse>(&mut self) -> Option<T> {
        let start = self.cursor;
        let value = T::parse(self).ok();
        self.cursor = start;
        value
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = self.try_parse::<T>()?;

        match self.peek_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::Unknown => {
                Err(Error::new(vec![token.span.clone()], kind::UnknownCharacter {
                    character: token.lexeme.to_owned(),
                }))
            },
            Some(token) => {
                let span = token.span.start..self.eof_span().end;
                Err(Error::new(vec![span], ExpectedEof))
            },
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by private parsing functions. Use [`Parser::try_parse`] to
    /// parse with automatic backtracking.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::*;
    use token::op::{BinOp, BinOpKind};

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_owned(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_owned(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    fn parse(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_full::<Expr>()
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), int("16", 0..2));
    }

    #[test]
    fn literal_symbol() {
        assert_eq!(parse("  x_y ").unwrap(), sym("x_y", 2..5));
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(parse("1 + 2 * 3").unwrap(), bin(
            int("1", 0..1),
            BinOpKind::Add,
            2..3,
            bin(int("2", 4..5), BinOpKind::Mul, 6..7, int("3", 8..9)),
        ));
    }

    #[test]
    fn left_associative_subtraction() {
        assert_eq!(parse("a-b-c").unwrap(), bin(
            bin(sym("a", 0..1), BinOpKind::Sub, 1..2, sym("b", 2..3)),
            BinOpKind::Sub,
            3..4,
            sym("c", 4..5),
        ));
    }

    #[test]
    fn right_associative_exponentiation() {
        assert_eq!(parse("2^3^4").unwrap(), bin(
            int("2", 0..1),
            BinOpKind::Exp,
            1..2,
            bin(int("3", 2..3), BinOpKind::Exp, 3..4, int("4", 4..5)),
        ));
    }

    #[test]
    fn exponent_after_product() {
        assert_eq!(parse("x*y^2").unwrap(), bin(
            sym("x", 0..1),
            BinOpKind::Mul,
            1..2,
            bin(sym("y", 2..3), BinOpKind::Exp, 3..4, int("2", 4..5)),
        ));
    }

    #[test]
    fn negation_binds_looser_than_exponentiation() {
        let Expr::Unary(unary) = parse("-x^2").unwrap() else {
            panic!("expected a negation");
        };
        assert_eq!(unary.span, 0..4);
        assert_eq!(*unary.operand, bin(sym("x", 1..2), BinOpKind::Exp, 2..3, int("2", 3..4)));
    }

    #[test]
    fn negation_binds_tighter_than_product() {
        let Expr::Binary(binary) = parse("-x*y").unwrap() else {
            panic!("expected a product");
        };
        assert_eq!(binary.op.kind, BinOpKind::Mul);
        assert!(matches!(*binary.lhs, Expr::Unary(_)));
    }

    #[test]
    fn negative_exponent() {
        let Expr::Binary(binary) = parse("2^-3").unwrap() else {
            panic!("expected a power");
        };
        assert_eq!(binary.op.kind, BinOpKind::Exp);
        assert!(matches!(*binary.rhs, Expr::Unary(_)));
    }

    #[test]
    fn parenthesized() {
        let Expr::Paren(paren) = parse("((a + b))").unwrap() else {
            panic!("expected parentheses");
        };
        assert_eq!(paren.span, 0..9);
        assert_eq!(paren.into_innermost(), bin(sym("a", 2..3), BinOpKind::Add, 4..5, sym("b", 6..7)));
    }

    #[test]
    fn call_with_arguments() {
        let Expr::Call(call) = parse("f(x, 2*y)").unwrap() else {
            panic!("expected a call");
        };
        assert_eq!(call.name.name, "f");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.args[0], sym("x", 2..3));
        assert_eq!(call.span, 0..9);
        assert_eq!(call.paren_span, 1..9);
    }

    #[test]
    fn call_without_arguments() {
        let Expr::Call(call) = parse("pi()").unwrap() else {
            panic!("expected a call");
        };
        assert!(call.args.is_empty());
    }

    #[test]
    fn nested_calls_and_powers() {
        let Expr::Binary(binary) = parse("cos(2*x)^2 + sin(2*x)^2").unwrap() else {
            panic!("expected a sum");
        };
        assert_eq!(binary.op.kind, BinOpKind::Add);
        let Expr::Binary(lhs) = *binary.lhs else {
            panic!("expected a power");
        };
        assert_eq!(lhs.op.kind, BinOpKind::Exp);
        assert!(matches!(*lhs.lhs, Expr::Call(_)));
    }

    #[test]
    fn error_unexpected_eof() {
        let err = parse("1 +").unwrap_err();
        assert!(err.is::<kind::UnexpectedEof>());
        assert_eq!(err.spans, vec![3..3]);
    }

    #[test]
    fn error_expected_eof() {
        let err = parse("1 2").unwrap_err();
        assert!(err.is::<kind::ExpectedEof>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn error_unknown_character() {
        let err = parse("a $ b").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnknownCharacter>(),
            Some(&kind::UnknownCharacter { character: "$".to_owned() }),
        );
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn error_unknown_character_in_operand() {
        let err = parse("1 + #").unwrap_err();
        assert!(err.is::<kind::UnknownCharacter>());
    }

    #[test]
    fn error_unclosed_parenthesis() {
        let err = parse("(1 + 2").unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);

        let err = parse("sin(x").unwrap_err();
        assert!(err.is::<kind::UnclosedParenthesis>());
        assert_eq!(err.spans, vec![3..4]);
    }

    #[test]
    fn error_unexpected_token_in_call() {
        let err = parse("f(x y)").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnexpectedToken>(),
            Some(&kind::UnexpectedToken {
                expected: &[TokenKind::Comma, TokenKind::CloseParen],
                found: TokenKind::Name,
            }),
        );
    }

    #[test]
    fn error_stray_operator() {
        let err = parse("* 2").unwrap_err();
        assert_eq!(
            err.downcast_ref::<kind::UnexpectedToken>().map(|e| e.found),
            Some(TokenKind::Mul),
        );
    }
}
