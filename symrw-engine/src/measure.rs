//! Measures of how simple an expression is.
//!
//! Both search strategies are driven by a [`Measure`], which maps an expression to a real number.
//! The engine only ever compares two measures with each other; what they mean is up to the
//! caller. The greedy simplifier treats lower as simpler, while the minimax search maximizes.

use crate::expr::Expr;

/// A total function from expressions to real numbers.
///
/// Any `Fn(&Expr) -> f64` is a measure.
pub trait Measure {
    /// Measures the expression.
    fn measure(&self, expr: &Expr) -> f64;
}

impl<F> Measure for F
where
    F: Fn(&Expr) -> f64,
{
    fn measure(&self, expr: &Expr) -> f64 {
        self(expr)
    }
}

/// The length of the rendered expression.
pub fn length(expr: &Expr) -> f64 {
    expr.to_string().len() as f64
}

/// The negated length of the rendered expression.
pub fn neg_length(expr: &Expr) -> f64 {
    -length(expr)
}

/// A weighted sum of the total number of arguments in the tree, the height of the tree, and the
/// length of the rendered expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    /// Weight of the total number of arguments of every application in the tree.
    pub args: f64,

    /// Weight of the height of the tree.
    pub height: f64,

    /// Weight of the rendered length.
    pub length: f64,
}

impl Default for Weighted {
    fn default() -> Self {
        Self { args: 1.0, height: 1.0, length: 0.5 }
    }
}

impl Measure for Weighted {
    fn measure(&self, expr: &Expr) -> f64 {
        self.args * arg_count(expr) as f64
            + self.height * height(expr) as f64
            + self.length * length(expr)
    }
}

/// The total number of arguments of every application in the tree.
fn arg_count(expr: &Expr) -> usize {
    match expr {
        Expr::Apply(app) => app.args.len() + app.args.iter().map(arg_count).sum::<usize>(),
        _ => 0,
    }
}

/// The height of the tree. Leaves on their own have height 0; inside an application they count
/// as 1.
fn height(expr: &Expr) -> usize {
    fn inner(expr: &Expr) -> usize {
        match expr {
            Expr::Apply(app) => 1 + app.args.iter().map(inner).max().unwrap_or(0).max(1),
            _ => 1,
        }
    }

    match expr {
        Expr::Apply(_) => inner(expr),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::build::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lengths() {
        let expr = pow(mul([Expr::symbol("x"), Expr::symbol("y")]), Expr::from(2));
        assert_eq!(expr.to_string(), "((x*y)^2)");
        assert_eq!(length(&expr), 9.0);
        assert_eq!(neg_length(&expr), -9.0);
    }

    #[test]
    fn weighted() {
        let leaf = Expr::symbol("x");
        assert_eq!(Weighted::default().measure(&leaf), 0.5);

        // `(sin(x)+1)`: 3 arguments, height 3, length 10
        let expr = add([call("sin", [Expr::symbol("x")]), Expr::from(1)]);
        assert_eq!(arg_count(&expr), 3);
        assert_eq!(height(&expr), 3);
        assert_eq!(Weighted::default().measure(&expr), 3.0 + 3.0 + 5.0);

        let only_args = Weighted { args: 1.0, height: 0.0, length: 0.0 };
        assert_eq!(only_args.measure(&expr), 3.0);
    }

    #[test]
    fn functions_are_measures() {
        let measures: [&dyn Measure; 2] = [&length, &neg_length];
        let expr = Expr::from(123);
        assert_eq!(measures.map(|m| m.measure(&expr)), [3.0, -3.0]);
    }
}
