//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs an error kind with the regions of source code it
//! points at.
//!
//! Errors raised while parsing always carry spans. Errors raised by the rewriting engine (for
//! example, a malformed rule) usually do not, since rules can be built without any source code;
//! those are created with [`Error::spanless`] and render as a bare message.

#[cfg(test)]
extern crate self as symrw_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `symrw_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the error as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns a reference to the error kind if it is of type `K`.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the given source code.
    pub fn report_to_stderr(&self, input: &str) {
        eprint!("{}", self.report_to_string(input));
    }

    /// Renders the report into a string, highlighting the given source code.
    pub fn report_to_string(&self, input: &str) -> String {
        let mut buf = Vec::new();
        match self.build_report("input").write(("input", Source::from(input)), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(err) => format!("{}\n(failed to render the report: {})\n", self, err),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use symrw_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("the `{}` operator is out of place", op),
        labels = ["this operator"],
        help = "remove it",
    )]
    struct StrayOperator {
        op: char,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "something went wrong inside a rule")]
    struct RuleTrouble;

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![2..3], StrayOperator { op: '+' });
        assert_eq!(err.to_string(), "the `+` operator is out of place");
    }

    #[test]
    fn downcast_kind() {
        let err = Error::spanless(RuleTrouble);
        assert!(err.is::<RuleTrouble>());
        assert!(!err.is::<StrayOperator>());
        assert_eq!(err.downcast_ref::<RuleTrouble>(), Some(&RuleTrouble));
    }

    #[test]
    fn report_contains_message_and_label() {
        let err = Error::new(vec![2..3], StrayOperator { op: '*' });
        let rendered = strip_ansi_escapes::strip_str(err.report_to_string("1 * * 2"));
        assert!(rendered.contains("the `*` operator is out of place"));
        assert!(rendered.contains("this operator"));
        assert!(rendered.contains("remove it"));
    }

    #[test]
    fn spanless_report_renders() {
        let err = Error::spanless(RuleTrouble);
        let rendered = strip_ansi_escapes::strip_str(err.report_to_string(""));
        assert!(rendered.contains("something went wrong inside a rule"));
    }
}
