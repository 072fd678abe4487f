//! Errors raised by the rewriting engine.

use ariadne::Fmt;
use symrw_attrs::ErrorKind;
use symrw_error::EXPR;

/// Two nested applications of the same associative operator were built with different numbers
/// of arguments, so they cannot be merged into one.
///
/// This usually points at a malformed rule, such as a pattern that mixes a binary `+` with a
/// ternary `+` in the same associativity group.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot flatten nested `{}` applications with different arities", name),
    labels = ["this expression"],
    help = format!(
        "the outer application takes {} arguments, but the inner one takes {}; build both with the {}",
        expected,
        found,
        "same number of arguments".fg(EXPR),
    ),
)]
pub struct ArityMismatch {
    /// The name of the operator.
    pub name: String,

    /// The declared arity of the outer application.
    pub expected: usize,

    /// The declared arity of the inner application.
    pub found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use symrw_error::Error;

    #[test]
    fn arity_mismatch_message() {
        let err = Error::spanless(ArityMismatch { name: "+".to_owned(), expected: 2, found: 3 });
        assert_eq!(err.to_string(), "cannot flatten nested `+` applications with different arities");
        assert!(err.is::<ArityMismatch>());
    }
}
