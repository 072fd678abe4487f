//! Conversion of parsed syntax trees into expressions and patterns.
//!
//! Both conversions build operators the same way:
//!
//! - `+` and `*` are commutative and associative (groups [`GroupId::ADD`] and [`GroupId::MUL`]).
//! - `/` is associative only ([`GroupId::DIV`]).
//! - `-`, `%`, `^` and function calls are plain applications.
//! - A negated integer literal, such as `-3`, becomes a negative constant; any other negation
//!   becomes a one-argument `-` application.
//! - Parentheses disappear.
//!
//! They only differ in what an identifier becomes: a [`Expr::Symbol`] in an expression, and a
//! pattern variable tagged `complex` in a pattern.
//!
//! [`GroupId::ADD`]: crate::expr::GroupId::ADD
//! [`GroupId::MUL`]: crate::expr::GroupId::MUL
//! [`GroupId::DIV`]: crate::expr::GroupId::DIV

use crate::{
    expr::{build, Expr, Node},
    pattern::Pattern,
    primitive::int_from_str,
};
use symrw_error::Error;
use symrw_parser::parser::{
    ast::{self, Literal},
    token::op::BinOpKind,
    Parser,
};

/// The tag given to every variable of a parsed pattern.
pub const COMPLEX: &str = "complex";

/// A tree that can be built from a syntax tree.
trait FromAst: Node {
    /// Converts an identifier.
    fn identifier(name: String) -> Self;
}

impl FromAst for Expr {
    fn identifier(name: String) -> Self {
        Expr::Symbol(name)
    }
}

impl FromAst for Pattern {
    fn identifier(name: String) -> Self {
        Pattern::var(name, [COMPLEX])
    }
}

fn integer<T: FromAst>(digits: &str, negative: bool) -> T {
    // the tokenizer only produces ASCII digits
    let value = int_from_str(digits).unwrap_or_default();
    T::constant(if negative { -value } else { value })
}

fn convert<T: FromAst>(expr: ast::Expr) -> T {
    match expr {
        ast::Expr::Literal(Literal::Integer(int)) => integer(&int.value, false),
        ast::Expr::Literal(Literal::Symbol(sym)) => T::identifier(sym.name),
        ast::Expr::Paren(paren) => convert(paren.into_innermost()),
        ast::Expr::Call(call) => build::call(&call.name.name, call.args.into_iter().map(convert)),
        ast::Expr::Unary(unary) => match *unary.operand {
            ast::Expr::Literal(Literal::Integer(int)) => integer(&int.value, true),
            operand => build::neg(convert(operand)),
        },
        ast::Expr::Binary(binary) => {
            let lhs = convert(*binary.lhs);
            let rhs = convert(*binary.rhs);
            match binary.op.kind {
                BinOpKind::Add => build::add([lhs, rhs]),
                BinOpKind::Mul => build::mul([lhs, rhs]),
                BinOpKind::Div => build::div(lhs, rhs),
                BinOpKind::Sub => build::sub(lhs, rhs),
                BinOpKind::Mod => build::rem(lhs, rhs),
                BinOpKind::Exp => build::pow(lhs, rhs),
            }
        },
    }
}

impl From<ast::Expr> for Expr {
    fn from(expr: ast::Expr) -> Self {
        convert(expr)
    }
}

impl From<ast::Expr> for Pattern {
    fn from(expr: ast::Expr) -> Self {
        convert(expr)
    }
}

/// Parses an expression from infix notation. Identifiers become symbols.
///
/// ```
/// use symrw_engine::parse_expr;
///
/// let expr = parse_expr("sin(2*x)^2 + -1").unwrap();
/// assert_eq!(expr.to_string(), "((sin((2*x))^2)+-1)");
/// ```
pub fn parse_expr(input: &str) -> Result<Expr, Error> {
    Parser::new(input).try_parse_full::<ast::Expr>().map(Expr::from)
}

/// Parses a pattern from infix notation. Identifiers become pattern variables tagged `complex`.
pub fn parse_pattern(input: &str) -> Result<Pattern, Error> {
    Parser::new(input).try_parse_full::<ast::Expr>().map(Pattern::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{build::*, Application, GroupId};
    use pretty_assertions::assert_eq;
    use symrw_parser::parser::error::kind::UnknownCharacter;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn operators() {
        let expr = parse_expr("a + b * c - d / e % f ^ g").unwrap();
        assert_eq!(expr, sub(
            add([sym("a"), mul([sym("b"), sym("c")])]),
            rem(div(sym("d"), sym("e")), pow(sym("f"), sym("g"))),
        ));
    }

    #[test]
    fn operator_properties() {
        let Expr::Apply(sum) = parse_expr("1 + 2").unwrap() else { panic!("not an application") };
        assert!(sum.commutative);
        assert_eq!(sum.assoc, Some(GroupId::ADD));

        let Expr::Apply(quotient) = parse_expr("1 / 2").unwrap() else { panic!("not an application") };
        assert!(!quotient.commutative);
        assert_eq!(quotient.assoc, Some(GroupId::DIV));

        let Expr::Apply(power) = parse_expr("1 ^ 2").unwrap() else { panic!("not an application") };
        assert_eq!(power, Application::new("^", vec![Expr::from(1), Expr::from(2)]));
    }

    #[test]
    fn chains_nest_binary() {
        let expr = parse_expr("a + b + c").unwrap();
        assert_eq!(expr, add([add([sym("a"), sym("b")]), sym("c")]));
    }

    #[test]
    fn negation() {
        assert_eq!(parse_expr("-3").unwrap(), Expr::from(-3));
        assert_eq!(parse_expr("2^-3").unwrap(), pow(Expr::from(2), Expr::from(-3)));
        assert_eq!(parse_expr("-x").unwrap(), neg(sym("x")));
        assert_eq!(parse_expr("-(3)").unwrap(), neg(Expr::from(3)));
    }

    #[test]
    fn calls_and_parens() {
        let expr = parse_expr("f(((x)), 10, g())").unwrap();
        assert_eq!(expr, call("f", [sym("x"), Expr::from(10), call("g", [])]));
    }

    #[test]
    fn huge_integers() {
        let expr = parse_expr("123456789012345678901234567890").unwrap();
        assert_eq!(expr.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn patterns_use_variables() {
        let pattern = parse_pattern("sin(x)^2 + 1").unwrap();
        assert_eq!(pattern, add([
            pow(call("sin", [Pattern::var("x", [COMPLEX])]), Pattern::from(2)),
            Pattern::from(1),
        ]));
        let Pattern::Apply(sum) = &pattern else { panic!("not an application") };
        let Pattern::Apply(power) = &sum.args[0] else { panic!("not an application") };
        let Pattern::Apply(sin) = &power.args[0] else { panic!("not an application") };
        let Pattern::Var(x) = &sin.args[0] else { panic!("not a variable") };
        assert!(x.has_tag(COMPLEX));
    }

    #[test]
    fn errors_are_reported() {
        let err = parse_expr("x $ y").unwrap_err();
        assert!(err.is::<UnknownCharacter>());
        assert_eq!(err.spans, vec![2..3]);
        assert!(parse_pattern("sin(x").is_err());
    }
}
