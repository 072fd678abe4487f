//! Shorthands for building trees by hand.
//!
//! The operators are built the same way the parser builds them: `+` and `*` are commutative and
//! associative, `/` is associative only, and `-`, `%`, `^` and named functions are plain. All of
//! them work for both [`Expr`](super::Expr) and [`Pattern`](crate::pattern::Pattern).

use super::{Application, GroupId, Node};

/// `a + b + ...`, built as a single application with the given arguments.
pub fn add<T: Node>(args: impl IntoIterator<Item = T>) -> T {
    T::from_application(Application::ac("+", GroupId::ADD, args.into_iter().collect()))
}

/// `a * b * ...`, built as a single application with the given arguments.
pub fn mul<T: Node>(args: impl IntoIterator<Item = T>) -> T {
    T::from_application(Application::ac("*", GroupId::MUL, args.into_iter().collect()))
}

/// `a / b`
pub fn div<T: Node>(lhs: T, rhs: T) -> T {
    T::from_application(Application::associative("/", GroupId::DIV, vec![lhs, rhs]))
}

/// `a - b`
pub fn sub<T: Node>(lhs: T, rhs: T) -> T {
    T::from_application(Application::new("-", vec![lhs, rhs]))
}

/// `a % b`
pub fn rem<T: Node>(lhs: T, rhs: T) -> T {
    T::from_application(Application::new("%", vec![lhs, rhs]))
}

/// `-a`
pub fn neg<T: Node>(operand: T) -> T {
    T::from_application(Application::new("-", vec![operand]))
}

/// `a ^ b`
pub fn pow<T: Node>(base: T, exp: T) -> T {
    T::from_application(Application::new("^", vec![base, exp]))
}

/// `name(a, b, ...)`
pub fn call<T: Node>(name: &str, args: impl IntoIterator<Item = T>) -> T {
    T::from_application(Application::new(name, args.into_iter().collect()))
}
