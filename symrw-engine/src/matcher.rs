//! Structural matching of expressions against patterns, and instantiation of templates.

use crate::{
    expr::{Application, Expr},
    pattern::{Pattern, PatternVar},
};
use std::collections::{btree_map, BTreeMap};

/// The variables bound by a successful match, mapping each variable name to the subtree it
/// matched.
///
/// An empty set of bindings is a successful match of a pattern without variables. It is distinct
/// from a failed match, which is represented by [`None`] wherever bindings are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<String, Expr>);

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the expression bound to the given variable.
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.0.get(name)
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the bindings, in order of variable name.
    pub fn iter(&self) -> btree_map::Iter<String, Expr> {
        self.0.iter()
    }

    /// Returns true if every variable bound in both sets is bound to equal expressions.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.0.iter().all(|(name, expr)| other.get(name).map_or(true, |other| other == expr))
    }

    /// Merges two compatible sets of bindings. Returns [`None`] if they are incompatible.
    pub fn merge(mut self, other: Self) -> Option<Self> {
        if !self.is_compatible(&other) {
            return None;
        }
        self.0.extend(other.0);
        Some(self)
    }
}

impl FromIterator<(String, Expr)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Expr)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Expr);
    type IntoIter = btree_map::Iter<'a, String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Decides whether a pattern variable may bind a given subtree, based on the variable's tags.
pub trait TagPolicy {
    /// Returns true if `var` may be bound to `expr`.
    fn accepts(&self, var: &PatternVar, expr: &Expr) -> bool;
}

/// Ignores tags entirely: every variable matches every subtree. This is the default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IgnoreTags;

impl TagPolicy for IgnoreTags {
    fn accepts(&self, _: &PatternVar, _: &Expr) -> bool {
        true
    }
}

/// Enforces the tags the built-in rule catalogs use:
///
/// - `integer`: the subtree must be an integer constant.
/// - `complex_nonzero`: the subtree must not be the constant `0`.
///
/// Any other tag (including `complex`) places no restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinTags;

impl TagPolicy for BuiltinTags {
    fn accepts(&self, var: &PatternVar, expr: &Expr) -> bool {
        var.tags.iter().all(|tag| match tag.as_str() {
            "integer" => expr.as_integer().is_some(),
            "complex_nonzero" => expr.as_integer().map_or(true, |n| *n != 0),
            _ => true,
        })
    }
}

/// Matches an expression against a pattern, ignoring variable tags.
///
/// See [`match_tree_with`].
pub fn match_tree(tree: &Expr, pattern: &Pattern) -> Option<Bindings> {
    match_tree_with(tree, pattern, &IgnoreTags)
}

/// Matches an expression against a pattern.
///
/// - A variable matches any subtree the tag policy accepts, binding it.
/// - An external matcher runs its predicate.
/// - An application matches an application with the same name and number of arguments, if every
///   argument matches and the bindings of all the arguments are compatible. Commutativity is
///   **not** taken into account here; that is done by expanding the pattern beforehand (see
///   [`crate::expand::generate_patterns`]).
/// - Constants and symbols match equal constants and symbols, with no bindings.
///
/// Returns [`None`] if the expression does not match.
pub fn match_tree_with(tree: &Expr, pattern: &Pattern, policy: &dyn TagPolicy) -> Option<Bindings> {
    match pattern {
        Pattern::External(matcher) => matcher.call(tree),
        Pattern::Var(var) => policy.accepts(var, tree)
            .then(|| Bindings::from_iter([(var.name.clone(), tree.clone())])),
        Pattern::Apply(pattern_app) => {
            let Expr::Apply(tree_app) = tree else {
                return None;
            };
            if pattern_app.name != tree_app.name || pattern_app.args.len() != tree_app.args.len() {
                return None;
            }

            tree_app.args.iter()
                .zip(&pattern_app.args)
                .try_fold(Bindings::new(), |bindings, (tree, pattern)| {
                    bindings.merge(match_tree_with(tree, pattern, policy)?)
                })
        },
        Pattern::Constant(value) => match tree {
            Expr::Constant(int) if int == value => Some(Bindings::new()),
            _ => None,
        },
        Pattern::Symbol(name) => match tree {
            Expr::Symbol(sym) if sym == name => Some(Bindings::new()),
            _ => None,
        },
    }
}

/// Instantiates `template` into a concrete expression, replacing every variable with a copy of
/// the expression bound to it.
///
/// Returns [`None`] if the template contains a variable that is not bound, or an external
/// matcher; neither can be turned into a concrete expression.
pub fn replace_in_tree(template: &Pattern, bindings: &Bindings) -> Option<Expr> {
    match template {
        Pattern::Constant(int) => Some(Expr::Constant(int.clone())),
        Pattern::Symbol(sym) => Some(Expr::Symbol(sym.clone())),
        Pattern::Var(var) => bindings.get(&var.name).cloned(),
        Pattern::External(_) => None,
        Pattern::Apply(app) => instantiate_args(app, bindings).map(Expr::Apply),
    }
}

fn instantiate_args(app: &Application<Pattern>, bindings: &Bindings) -> Option<Application<Expr>> {
    let args = app.args.iter()
        .map(|arg| replace_in_tree(arg, bindings))
        .collect::<Option<Vec<_>>>()?;
    Some(app.with_args(args))
}
