//! The expression tree the rewriting engine operates on.
//!
//! The [`Expr`](symrw_parser::parser::ast::Expr) type from `symrw_parser` is a spanned syntax
//! tree. It is convenient for parsing and error reporting, but not for rewriting: every operator
//! is a separate node kind, and parentheses are kept around.
//!
//! This module defines a separate [`Expr`] with exactly three kinds of node: integer constants,
//! symbols, and [`Application`]s of a named operator or function to an ordered list of
//! arguments. Operators carry the algebraic properties the matcher cares about: whether their
//! arguments may be reordered ([`Application::commutative`]), and whether nested applications of
//! the same operator may be merged and regrouped ([`Application::assoc`]).
//!
//! # Equality
//!
//! The [`PartialEq`] implementation is purely structural: two applications are equal if they have
//! the same name, the same algebraic properties, and positionally equal arguments. `a + b` and
//! `b + a` are **not** equal; commutativity is only taken into account by pattern expansion (see
//! [`crate::expand`]).

pub mod build;
mod iter;

pub use iter::ExprIter;

use rug::Integer;
use std::fmt;

/// Identifies a family of associative operators whose nested applications can be merged into a
/// single n-ary application, and split back apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl GroupId {
    /// The group of addition.
    pub const ADD: Self = Self(0);

    /// The group of multiplication.
    pub const MUL: Self = Self(1);

    /// The group of division.
    pub const DIV: Self = Self(2);
}

/// An operator or function applied to an ordered list of arguments.
///
/// The type is generic over the argument type so that it can be shared between concrete
/// expressions ([`Expr`]) and patterns ([`Pattern`](crate::pattern::Pattern)).
#[derive(Debug, Clone)]
pub struct Application<T> {
    /// The name of the operator or function, such as `+` or `sin`.
    pub name: String,

    /// The arguments, in order.
    pub args: Vec<T>,

    /// Whether the arguments may be reordered freely.
    pub commutative: bool,

    /// The associativity group of the operator, if it is associative.
    pub assoc: Option<GroupId>,

    /// The number of arguments the application was built with. Flattening merges nested
    /// applications into one with more arguments than this; unflattening groups them back into
    /// applications of exactly this many arguments.
    pub declared_arity: usize,
}

impl<T> Application<T> {
    /// Creates a plain (neither commutative nor associative) application.
    pub fn new(name: impl Into<String>, args: Vec<T>) -> Self {
        let declared_arity = args.len();
        Self {
            name: name.into(),
            args,
            commutative: false,
            assoc: None,
            declared_arity,
        }
    }

    /// Creates a commutative, non-associative application.
    pub fn commutative(name: impl Into<String>, args: Vec<T>) -> Self {
        Self { commutative: true, ..Self::new(name, args) }
    }

    /// Creates an associative, non-commutative application.
    pub fn associative(name: impl Into<String>, group: GroupId, args: Vec<T>) -> Self {
        Self { assoc: Some(group), ..Self::new(name, args) }
    }

    /// Creates an application that is both commutative and associative.
    pub fn ac(name: impl Into<String>, group: GroupId, args: Vec<T>) -> Self {
        Self { commutative: true, assoc: Some(group), ..Self::new(name, args) }
    }

    /// Creates an application with the same name, properties and declared arity as this one, but
    /// with the given arguments.
    pub fn with_args<U>(&self, args: Vec<U>) -> Application<U> {
        Application {
            name: self.name.clone(),
            args,
            commutative: self.commutative,
            assoc: self.assoc,
            declared_arity: self.declared_arity,
        }
    }

    /// Returns true if both applications have the same name and both belong to the same
    /// associativity group. Such applications are merged by flattening.
    pub fn merges_with<U>(&self, other: &Application<U>) -> bool {
        self.assoc.is_some() && self.assoc == other.assoc && self.name == other.name
    }
}

/// The declared arity is bookkeeping for regrouping; it does not take part in equality.
impl<T: PartialEq> PartialEq for Application<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.commutative == other.commutative
            && self.assoc == other.assoc
            && self.args == other.args
    }
}

impl<T: Eq> Eq for Application<T> {}

/// Operators rendered in infix form.
const INFIX_OPERATORS: [&str; 6] = ["+", "-", "*", "/", "%", "^"];

/// Renders an application: infix operators fully parenthesized (`(a+b)`, or `(-a)` with a single
/// argument), everything else in function call syntax (`f(a, b)`).
impl<T: fmt::Display> fmt::Display for Application<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if INFIX_OPERATORS.contains(&self.name.as_str()) && !self.args.is_empty() {
            write!(f, "(")?;
            if let [arg] = self.args.as_slice() {
                write!(f, "{}{}", self.name, arg)?;
            } else {
                let mut iter = self.args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, "{}{}", self.name, arg)?;
                    }
                }
            }
            return write!(f, ")");
        }

        write!(f, "{}(", self.name)?;
        let mut iter = self.args.iter();
        if let Some(arg) = iter.next() {
            write!(f, "{}", arg)?;
            for arg in iter {
                write!(f, ", {}", arg)?;
            }
        }
        write!(f, ")")
    }
}

/// A concrete symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer, such as `2` or `-144`.
    Constant(Integer),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// An operator or function applied to arguments, such as `x + 1` or `sin(x)`.
    Apply(Application<Expr>),
}

impl Expr {
    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Returns the integer value if this is a constant.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            Self::Constant(int) => Some(int),
            _ => None,
        }
    }

    /// Returns the application if this is an application.
    pub fn as_apply(&self) -> Option<&Application<Expr>> {
        match self {
            Self::Apply(app) => Some(app),
            _ => None,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first), yielding each node with its path from the root.
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the node at the given path, or [`None`] if the path leads outside the tree.
    pub fn at_path(&self, path: &[usize]) -> Option<&Expr> {
        path.iter().try_fold(self, |node, &index| node.as_apply()?.args.get(index))
    }

    /// Returns a mutable reference to the node at the given path, or [`None`] if the path leads
    /// outside the tree.
    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut Expr> {
        path.iter().try_fold(self, |node, &index| match node {
            Self::Apply(app) => app.args.get_mut(index),
            _ => None,
        })
    }
}

impl From<Integer> for Expr {
    fn from(int: Integer) -> Self {
        Self::Constant(int)
    }
}

impl From<i32> for Expr {
    fn from(int: i32) -> Self {
        Self::Constant(Integer::from(int))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(int) => write!(f, "{}", int),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Apply(app) => write!(f, "{}", app),
        }
    }
}

/// A tree whose inner nodes are [`Application`]s. Implemented by both [`Expr`] and
/// [`Pattern`](crate::pattern::Pattern), so that flattening and pattern expansion can work on
/// either.
pub trait Node: Clone + PartialEq + fmt::Display {
    /// Creates a constant leaf.
    fn constant(value: Integer) -> Self;

    /// Returns the application if this node is one.
    fn as_application(&self) -> Option<&Application<Self>>;

    /// Unwraps the application if this node is one, or gives the node back otherwise.
    fn into_application(self) -> Result<Application<Self>, Self>;

    /// Wraps an application into a node.
    fn from_application(app: Application<Self>) -> Self;
}

impl Node for Expr {
    fn constant(value: Integer) -> Self {
        Self::Constant(value)
    }

    fn as_application(&self) -> Option<&Application<Self>> {
        self.as_apply()
    }

    fn into_application(self) -> Result<Application<Self>, Self> {
        match self {
            Self::Apply(app) => Ok(app),
            other => Err(other),
        }
    }

    fn from_application(app: Application<Self>) -> Self {
        Self::Apply(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::build::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_is_positional() {
        let a = add([Expr::symbol("a"), Expr::symbol("b")]);
        let b = add([Expr::symbol("b"), Expr::symbol("a")]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn equality_compares_properties() {
        let plain = Expr::Apply(Application::new("+", vec![Expr::from(1), Expr::from(2)]));
        let ac = add([Expr::from(1), Expr::from(2)]);
        assert_ne!(plain, ac);
    }

    #[test]
    fn equality_ignores_declared_arity() {
        let mut a = Application::ac("+", GroupId::ADD, vec![Expr::from(1), Expr::from(2), Expr::from(3)]);
        let b = a.clone();
        a.declared_arity = 2;
        assert_eq!(a, b);
    }

    #[test]
    fn render_infix() {
        let expr = add([
            pow(call("sin", [Expr::symbol("x")]), Expr::from(2)),
            mul([Expr::from(-3), Expr::symbol("y")]),
        ]);
        assert_eq!(expr.to_string(), "((sin(x)^2)+(-3*y))");
    }

    #[test]
    fn render_nary_and_unary() {
        let sum = Expr::Apply(Application::ac(
            "+",
            GroupId::ADD,
            vec![Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c")],
        ));
        assert_eq!(sum.to_string(), "(a+b+c)");
        assert_eq!(neg(Expr::symbol("a")).to_string(), "(-a)");
    }

    #[test]
    fn render_call() {
        let expr = call("f", [Expr::symbol("x"), Expr::from(10)]);
        assert_eq!(expr.to_string(), "f(x, 10)");
        assert_eq!(call::<Expr>("pi", []).to_string(), "pi()");
    }

    #[test]
    fn replace_at_path() {
        let mut expr = mul([Expr::from(2), call("cos", [Expr::symbol("x")])]);
        *expr.at_path_mut(&[1, 0]).unwrap() = Expr::symbol("y");
        assert_eq!(expr.to_string(), "(2*cos(y))");
        assert_eq!(expr.at_path(&[0]), Some(&Expr::from(2)));
        assert_eq!(expr.at_path(&[0, 0]), None);
    }
}
