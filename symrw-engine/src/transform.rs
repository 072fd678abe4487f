//! Whole-tree transformations applied before rules, such as constant folding.

use crate::expr::Expr;
use rug::Integer;
use std::mem;

/// A total function from expressions to expressions, applied to the whole tree before rules are
/// tried.
///
/// Any `Fn(Expr) -> Expr` is a transformation.
pub trait Transformation {
    /// Transforms the expression.
    fn transform(&self, expr: Expr) -> Expr;
}

impl<F> Transformation for F
where
    F: Fn(Expr) -> Expr,
{
    fn transform(&self, expr: Expr) -> Expr {
        self(expr)
    }
}

/// Applies each transformation in order, each one to the output of the previous.
pub fn apply_all(expr: Expr, transformations: &[&dyn Transformation]) -> Expr {
    transformations.iter().fold(expr, |expr, transformation| transformation.transform(expr))
}

/// Evaluates binary `+`, `-`, `*`, `/` and `%` applied to two integer constants, bottom-up.
///
/// - `/` is only evaluated if the division is exact; `6 / 4` is left as is.
/// - `%` takes the sign of the divisor: `-7 % 3 = 2`.
/// - Division and remainder by zero are left unevaluated.
///
/// Anything else, including applications with more or less than two arguments, is left
/// untouched.
pub fn fold_constants(expr: Expr) -> Expr {
    let Expr::Apply(mut app) = expr else {
        return expr;
    };

    app.args = mem::take(&mut app.args)
        .into_iter()
        .map(fold_constants)
        .collect();

    let value = match app.args.as_slice() {
        [Expr::Constant(lhs), Expr::Constant(rhs)] => evaluate(&app.name, lhs, rhs),
        _ => None,
    };
    match value {
        Some(value) => Expr::Constant(value),
        None => Expr::Apply(app),
    }
}

/// Evaluates a binary operator on two integers, if the result is an integer.
fn evaluate(op: &str, lhs: &Integer, rhs: &Integer) -> Option<Integer> {
    match op {
        "+" => Some(Integer::from(lhs + rhs)),
        "-" => Some(Integer::from(lhs - rhs)),
        "*" => Some(Integer::from(lhs * rhs)),
        "/" => {
            if *rhs == 0 || !lhs.is_divisible(rhs) {
                return None;
            }
            Some(lhs.clone().div_exact(rhs))
        },
        "%" => {
            if *rhs == 0 {
                return None;
            }
            let (_, remainder) = lhs.clone().div_rem_floor(rhs.clone());
            Some(remainder)
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{build::*, Application, GroupId};
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_fold() {
        let two_plus_two = || add([Expr::from(2), Expr::from(2)]);
        let expr = mul([two_plus_two(), two_plus_two()]);
        assert_eq!(fold_constants(expr), Expr::from(16));
    }

    #[test]
    fn operators() {
        assert_eq!(fold_constants(sub(Expr::from(2), Expr::from(5))), Expr::from(-3));
        assert_eq!(fold_constants(div(Expr::from(12), Expr::from(-4))), Expr::from(-3));
        assert_eq!(fold_constants(rem(Expr::from(-7), Expr::from(3))), Expr::from(2));
        assert_eq!(fold_constants(rem(Expr::from(7), Expr::from(-3))), Expr::from(-2));
    }

    #[test]
    fn inexact_division_is_kept() {
        let expr = div(Expr::from(6), Expr::from(4));
        assert_eq!(fold_constants(expr.clone()), expr);
    }

    #[test]
    fn division_by_zero_is_kept() {
        let expr = div(Expr::from(1), Expr::from(0));
        assert_eq!(fold_constants(expr.clone()), expr);
        let expr = rem(Expr::from(1), Expr::from(0));
        assert_eq!(fold_constants(expr.clone()), expr);
    }

    #[test]
    fn leaves_other_nodes_alone() {
        let expr = add([Expr::symbol("x"), add([Expr::from(1), Expr::from(2)])]);
        assert_eq!(fold_constants(expr), add([Expr::symbol("x"), Expr::from(3)]));

        let expr = pow(Expr::from(2), Expr::from(3));
        assert_eq!(fold_constants(expr.clone()), expr);

        let expr = call("f", [Expr::from(2), Expr::from(3)]);
        assert_eq!(fold_constants(expr.clone()), expr);

        let sum = Expr::Apply(Application::ac("+", GroupId::ADD, vec![Expr::from(1), Expr::from(2), Expr::from(3)]));
        assert_eq!(fold_constants(sum.clone()), sum);
    }

    #[test]
    fn closures_are_transformations() {
        let double = |expr: Expr| mul([Expr::from(2), expr]);
        let transformations: [&dyn Transformation; 2] = [&double, &fold_constants];
        assert_eq!(apply_all(Expr::from(21), &transformations), Expr::from(42));
    }
}
