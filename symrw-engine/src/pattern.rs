//! Patterns: expression trees with holes.
//!
//! A [`Pattern`] has the same shape as an [`Expr`], plus two kinds of leaves that only make sense
//! inside a rule: [`PatternVar`]s, which match any subtree and bind it to a name, and
//! [`ExternalMatcher`]s, which run arbitrary code to decide whether a subtree matches.

use crate::{
    expr::{Application, Expr, Node},
    matcher::Bindings,
    primitive::int,
};
use rug::Integer;
use std::{collections::BTreeSet, fmt, sync::Arc};

/// A pattern variable, such as the `x` in `sin(x)^2 + cos(x)^2`.
///
/// The tags describe what the variable is meant to stand for (`integer`, `complex`,
/// `complex_nonzero`, ...). They are carried through pattern expansion unchanged; whether they
/// restrict matching is up to the [`TagPolicy`](crate::matcher::TagPolicy) in use.
#[derive(Debug, Clone)]
pub struct PatternVar {
    /// The name of the variable.
    pub name: String,

    /// The tags of the variable.
    pub tags: BTreeSet<String>,
}

impl PatternVar {
    /// Creates a pattern variable with the given tags.
    pub fn new<S: Into<String>>(name: impl Into<String>, tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the variable carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Variables are identified by name alone.
impl PartialEq for PatternVar {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PatternVar {}

/// The predicate of an [`ExternalMatcher`]. It receives the subtree to match and the names of the
/// variables the matcher captures, and returns the bindings on success.
pub type Predicate = dyn Fn(&Expr, &[String]) -> Option<Bindings> + Send + Sync;

/// A matcher for subtrees that cannot be described structurally, such as "an even integer".
///
/// Two external matchers are equal if they have the same name and capture the same variables; the
/// name identifies the predicate.
#[derive(Clone)]
pub struct ExternalMatcher {
    name: String,
    captures: Vec<String>,
    predicate: Arc<Predicate>,
}

impl ExternalMatcher {
    /// Creates an external matcher from a predicate.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        captures: impl IntoIterator<Item = S>,
        predicate: impl Fn(&Expr, &[String]) -> Option<Bindings> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            captures: captures.into_iter().map(Into::into).collect(),
            predicate: Arc::new(predicate),
        }
    }

    /// Matches an even integer constant `2n`, binding `capture -> n`.
    ///
    /// This lets a rule such as `sin(2k * x) -> 2 * sin(k * x) * cos(k * x)` apply to `sin(4 * a)`,
    /// which the structural pattern `sin(2 * x)` would not match.
    pub fn halving(capture: impl Into<String>) -> Self {
        Self::new("halve", [capture.into()], |expr, captures| {
            let value = expr.as_integer()?;
            if !value.is_even() {
                return None;
            }

            let name = captures.first()?;
            let half = value.clone().div_exact(&int(2));
            Some(Bindings::from_iter([(name.clone(), Expr::Constant(half))]))
        })
    }

    /// The name of the matcher.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The names of the variables the matcher binds.
    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Runs the predicate on the given subtree.
    pub fn call(&self, expr: &Expr) -> Option<Bindings> {
        (self.predicate)(expr, &self.captures)
    }
}

impl PartialEq for ExternalMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.captures == other.captures
    }
}

impl Eq for ExternalMatcher {}

impl fmt::Debug for ExternalMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalMatcher")
            .field("name", &self.name)
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ExternalMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}({})]]", self.name, self.captures.join(", "))
    }
}

/// An expression tree that may contain pattern variables and external matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matches exactly this integer.
    Constant(Integer),

    /// Matches exactly this symbol.
    Symbol(String),

    /// Matches an application with the same name and number of arguments, whose arguments match
    /// the arguments of this application.
    Apply(Application<Pattern>),

    /// Matches anything, binding it to the variable.
    Var(PatternVar),

    /// Matches whatever the external predicate accepts.
    External(ExternalMatcher),
}

impl Pattern {
    /// Creates a pattern variable with the given tags.
    pub fn var<S: Into<String>>(name: impl Into<String>, tags: impl IntoIterator<Item = S>) -> Self {
        Self::Var(PatternVar::new(name, tags))
    }

    /// Creates a pattern that matches exactly the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Returns the names of all pattern variables in the pattern, including the variables
    /// captured by external matchers.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(pattern) = stack.pop() {
            match pattern {
                Self::Constant(_) | Self::Symbol(_) => {},
                Self::Apply(app) => stack.extend(app.args.iter()),
                Self::Var(var) => {
                    names.insert(var.name.clone());
                },
                Self::External(matcher) => names.extend(matcher.captures().iter().cloned()),
            }
        }
        names
    }
}

/// Lifts a concrete expression into a pattern that matches exactly that expression.
impl From<Expr> for Pattern {
    fn from(expr: Expr) -> Self {
        match expr {
            Expr::Constant(int) => Self::Constant(int),
            Expr::Symbol(sym) => Self::Symbol(sym),
            Expr::Apply(Application { name, args, commutative, assoc, declared_arity }) => {
                Self::Apply(Application {
                    name,
                    args: args.into_iter().map(Self::from).collect(),
                    commutative,
                    assoc,
                    declared_arity,
                })
            },
        }
    }
}

impl From<i32> for Pattern {
    fn from(int: i32) -> Self {
        Self::Constant(Integer::from(int))
    }
}

impl From<ExternalMatcher> for Pattern {
    fn from(matcher: ExternalMatcher) -> Self {
        Self::External(matcher)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(int) => write!(f, "{}", int),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Apply(app) => write!(f, "{}", app),
            Self::Var(var) => write!(f, "{}", var.name),
            Self::External(matcher) => write!(f, "{}", matcher),
        }
    }
}

impl Node for Pattern {
    fn constant(value: Integer) -> Self {
        Self::Constant(value)
    }

    fn as_application(&self) -> Option<&Application<Self>> {
        match self {
            Self::Apply(app) => Some(app),
            _ => None,
        }
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
    use crate::expr::build::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variables_compare_by_name() {
        let a = Pattern::var("x", ["complex"]);
        let b = Pattern::var("x", ["integer"]);
        assert_eq!(a, b);
        assert_ne!(a, Pattern::var("y", ["complex"]));
    }

    #[test]
    fn collect_variables() {
        let pattern = mul([
            Pattern::from(ExternalMatcher::halving("k")),
            call("sin", [Pattern::var("x", ["complex"])]),
        ]);
        let names = pattern.variables().into_iter().collect::<Vec<_>>();
        assert_eq!(names, vec!["k".to_owned(), "x".to_owned()]);
    }

    #[test]
    fn render_pattern() {
        let pattern = call("sin", [mul([
            Pattern::from(ExternalMatcher::halving("k")),
            Pattern::var("x", ["complex"]),
        ])]);
        assert_eq!(pattern.to_string(), "sin(([[halve(k)]]*x))");
    }

    #[test]
    fn halving_matches_even_constants() {
        let matcher = ExternalMatcher::halving("k");
        let bindings = matcher.call(&Expr::from(6)).unwrap();
        assert_eq!(bindings.get("k"), Some(&Expr::from(3)));

        let bindings = matcher.call(&Expr::from(-4)).unwrap();
        assert_eq!(bindings.get("k"), Some(&Expr::from(-2)));

        assert_eq!(matcher.call(&Expr::from(7)), None);
        assert_eq!(matcher.call(&Expr::symbol("a")), None);
    }
}
