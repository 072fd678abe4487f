//! Rewrite rules and ordered sets of them.

use crate::{
    expand::generate_patterns,
    expr::Expr,
    matcher::{match_tree_with, replace_in_tree, TagPolicy},
    pattern::Pattern,
};
use std::{collections::BTreeSet, fmt, ops::Deref};
use symrw_error::Error;
use tracing::debug;

/// Tag that stops [`RuleSet::add_rule`] from adding the reverse of a rule.
pub const ONEWAY: &str = "oneway";

/// Tag that stops a rule from expanding its source pattern. The rule then only matches trees with
/// exactly the shape of its source.
pub const DISABLE_AC_MATCHING: &str = "disable_ac_matching";

/// A rewrite rule: every subtree matching `source` may be replaced by `target`, instantiated with
/// the bindings of the match.
///
/// A rule is immutable once built. The variants of its source pattern under commutativity and
/// associativity are computed when the rule is built, since that is by far the most expensive
/// part of matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    source: Pattern,
    target: Pattern,
    tags: BTreeSet<String>,
    variants: Vec<Pattern>,

    /// False if the target uses a variable that no match of the source binds.
    can_fire: bool,
}

impl Rule {
    /// Creates a rule rewriting `source` into `target`.
    ///
    /// Returns an error if `source` is malformed (see [`crate::expand::flatten`]).
    pub fn new<S: Into<String>>(
        source: Pattern,
        target: Pattern,
        tags: impl IntoIterator<Item = S>,
    ) -> Result<Self, Error> {
        let tags = tags.into_iter().map(Into::into).collect::<BTreeSet<String>>();
        let variants = if tags.contains(DISABLE_AC_MATCHING) {
            vec![source.clone()]
        } else {
            generate_patterns(&source)?
        };

        let bound = source.variables();
        let unbound = target.variables()
            .into_iter()
            .filter(|name| !bound.contains(name))
            .collect::<Vec<_>>();
        if !unbound.is_empty() {
            debug!(source = %source, target = %target, ?unbound, "rule can never fire");
        }

        Ok(Self { source, target, tags, variants, can_fire: unbound.is_empty() })
    }

    /// The pattern this rule rewrites.
    pub fn source(&self) -> &Pattern {
        &self.source
    }

    /// The template the matched subtree is replaced with.
    pub fn target(&self) -> &Pattern {
        &self.target
    }

    /// The tags of this rule.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// The variants of the source pattern, tried in order when matching.
    pub fn variants(&self) -> &[Pattern] {
        &self.variants
    }

    /// Returns true if the rule carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns false if the target needs a variable the source never binds, as in the reverse
    /// of `sin(x)^2 + cos(x)^2 -> 1`. Such a rule never rewrites anything.
    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    /// Creates the rule rewriting `target` back into `source`, with the same tags.
    pub fn reversed(&self) -> Result<Self, Error> {
        Self::new(self.target.clone(), self.source.clone(), self.tags.iter().cloned())
    }

    /// Tries to rewrite the given node itself (not its children).
    ///
    /// The variants are tried in order. The first one that matches and whose bindings instantiate
    /// the whole target wins; the instantiated target is returned.
    pub fn rewrite_node(&self, node: &Expr, policy: &dyn TagPolicy) -> Option<Expr> {
        if !self.can_fire {
            return None;
        }
        self.variants.iter().find_map(|variant| {
            let bindings = match_tree_with(node, variant, policy)?;
            replace_in_tree(&self.target, &bindings)
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)?;
        if !self.tags.is_empty() {
            let tags = self.tags.iter().map(String::as_str).collect::<Vec<_>>();
            write!(f, " (tags: {})", tags.join(", "))?;
        }
        Ok(())
    }
}

/// An ordered sequence of rules.
///
/// The order is significant: both search strategies try rules in this order, and break ties in
/// favor of the earlier rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Appends the rule `source -> target` and, unless it is tagged [`ONEWAY`], the reverse rule
    /// `target -> source`, with the same tags.
    ///
    /// Nothing is added if either rule cannot be built.
    pub fn add_rule<S: Into<String>>(
        &mut self,
        source: Pattern,
        target: Pattern,
        tags: impl IntoIterator<Item = S>,
    ) -> Result<(), Error> {
        let forward = Rule::new(source, target, tags)?;
        if forward.has_tag(ONEWAY) {
            self.rules.push(forward);
        } else {
            let backward = forward.reversed()?;
            self.rules.push(forward);
            self.rules.push(backward);
        }
        Ok(())
    }

    /// Returns the rules that carry at least one of the given tags, in their original order.
    pub fn filter_rules<S: AsRef<str>>(&self, tags: impl IntoIterator<Item = S>) -> RuleSet {
        let wanted = tags.into_iter()
            .map(|tag| tag.as_ref().to_owned())
            .collect::<BTreeSet<_>>();
        self.rules.iter()
            .filter(|rule| !rule.tags.is_disjoint(&wanted))
            .cloned()
            .collect()
    }

    /// Appends every rule of another set.
    pub fn extend_from(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }
}

impl Deref for RuleSet {
    type Target = [Rule];

    fn deref(&self) -> &Self::Target {
        &self.rules
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self { rules: iter.into_iter().collect() }
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Appends `source -> target` (and its reverse, unless tagged [`ONEWAY`]) to the rule set.
///
/// See [`RuleSet::add_rule`].
pub fn add_rule<S: Into<String>>(
    rules: &mut RuleSet,
    source: Pattern,
    target: Pattern,
    tags: impl IntoIterator<Item = S>,
) -> Result<(), Error> {
    rules.add_rule(source, target, tags)
}

/// Returns the rules of the set that carry at least one of the given tags.
///
/// See [`RuleSet::filter_rules`].
pub fn filter_rules<S: AsRef<str>>(rules: &RuleSet, tags: impl IntoIterator<Item = S>) -> RuleSet {
    rules.filter_rules(tags)
}
