//! Applying a rule somewhere inside an expression.

use crate::{
    expr::Expr,
    matcher::{IgnoreTags, TagPolicy},
    rule::Rule,
};
use tracing::trace;

/// Finds the first node of `tree`, in left-to-right post-order, that `rule` can rewrite. Returns
/// the path to that node and its replacement.
pub fn find_rewrite(rule: &Rule, tree: &Expr, policy: &dyn TagPolicy) -> Option<(Vec<usize>, Expr)> {
    tree.post_order_iter()
        .find_map(|(path, node)| rule.rewrite_node(node, policy).map(|new| (path, new)))
}

/// Applies `rule` at a single site of `tree`, if possible, returning the rewritten tree. Returns
/// [`None`] if the rule does not apply anywhere.
///
/// See [`apply_rule_in_tree`].
pub fn try_apply_rule(rule: &Rule, tree: &Expr, policy: &dyn TagPolicy) -> Option<Expr> {
    let (path, replacement) = find_rewrite(rule, tree, policy)?;
    let mut rewritten = tree.clone();
    let site = rewritten.at_path_mut(&path)?;
    trace!(rule = %rule, at = ?path, "rewriting `{}` to `{}`", site, replacement);
    *site = replacement;
    Some(rewritten)
}

/// Applies `rule` to the first node of `tree` it can rewrite, ignoring variable tags.
///
/// See [`apply_rule_in_tree_with`].
pub fn apply_rule_in_tree(rule: &Rule, tree: &Expr) -> Expr {
    apply_rule_in_tree_with(rule, tree, &IgnoreTags)
}

/// Applies `rule` to the first node of `tree` it can rewrite, and returns the resulting tree.
///
/// Nodes are visited bottom-up, left to right, so the innermost rewritable subtree is rewritten
/// first. At each node the variants of the rule's source are tried in order; the node is
/// rewritten by the first one that matches and whose bindings fully instantiate the target.
/// A variable-free rule such as `sin(0) -> 0` therefore applies, but the reverse of a rule that
/// introduces variables (`1 -> sin(x)^2 + cos(x)^2`) never does.
///
/// Only a single site is rewritten per call; calling again may rewrite another one. If the rule
/// does not apply anywhere, a copy of `tree` is returned. `tree` itself is never modified.
pub fn apply_rule_in_tree_with(rule: &Rule, tree: &Expr, policy: &dyn TagPolicy) -> Expr {
    try_apply_rule(rule, tree, policy).unwrap_or_else(|| tree.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        expr::build::*,
        matcher::BuiltinTags,
        pattern::{ExternalMatcher, Pattern},
        rule::{RuleSet, ONEWAY},
    };
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn var(name: &str) -> Pattern {
        Pattern::var(name, ["complex"])
    }

    fn pythagorean() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.add_rule(
            add([pow(call("sin", [var("x")]), Pattern::from(2)), pow(call("cos", [var("x")]), Pattern::from(2))]),
            Pattern::from(1),
            ["trig"],
        ).unwrap();
        rules
    }

    #[test]
    fn pythagorean_identity_regardless_of_order() {
        let rules = pythagorean();
        let two_x = mul([Expr::from(2), sym("x")]);
        let tree = add([
            pow(call("cos", [two_x.clone()]), Expr::from(2)),
            pow(call("sin", [two_x]), Expr::from(2)),
        ]);
        assert_eq!(apply_rule_in_tree(&rules[0], &tree), Expr::from(1));
    }

    #[test]
    fn unmatched_rule_returns_copy() {
        let rules = pythagorean();
        let tree = add([sym("a"), sym("b")]);
        assert_eq!(apply_rule_in_tree(&rules[0], &tree), tree);
        assert_eq!(try_apply_rule(&rules[0], &tree, &IgnoreTags), None);

        // the reverse would need to invent `x`
        assert_eq!(apply_rule_in_tree(&rules[1], &Expr::from(1)), Expr::from(1));
    }

    #[test]
    fn only_first_site_bottom_up() {
        let mut rules = RuleSet::new();
        rules.add_rule(call("f", [var("x")]), call("g", [var("x")]), [ONEWAY]).unwrap();

        let tree = add([call("f", [call("f", [sym("a")])]), call("f", [sym("b")])]);
        let once = apply_rule_in_tree(&rules[0], &tree);
        assert_eq!(once, add([call("f", [call("g", [sym("a")])]), call("f", [sym("b")])]));

        let twice = apply_rule_in_tree(&rules[0], &once);
        assert_eq!(twice, add([call("g", [call("g", [sym("a")])]), call("f", [sym("b")])]));

        let thrice = apply_rule_in_tree(&rules[0], &twice);
        assert_eq!(thrice, add([call("g", [call("g", [sym("a")])]), call("g", [sym("b")])]));
    }

    #[test]
    fn variable_free_rule_fires() {
        let mut rules = RuleSet::new();
        rules.add_rule(call("sin", [Pattern::from(0)]), Pattern::from(0), [ONEWAY]).unwrap();

        let tree = add([call("sin", [Expr::from(0)]), sym("y")]);
        assert_eq!(apply_rule_in_tree(&rules[0], &tree), add([Expr::from(0), sym("y")]));
    }

    #[test]
    fn template_is_never_shared() {
        let mut rules = RuleSet::new();
        rules.add_rule(call("tan", [var("x")]), div(call("sin", [var("x")]), call("cos", [var("x")])), [ONEWAY])
            .unwrap();
        let before = rules[0].target().clone();

        let a = apply_rule_in_tree(&rules[0], &call("tan", [sym("a")]));
        let b = apply_rule_in_tree(&rules[0], &call("tan", [sym("b")]));
        assert_eq!(a, div(call("sin", [sym("a")]), call("cos", [sym("a")])));
        assert_eq!(b, div(call("sin", [sym("b")]), call("cos", [sym("b")])));
        assert_eq!(rules[0].target(), &before);
    }

    #[test]
    fn external_matcher_in_source() {
        let mut rules = RuleSet::new();
        let k = || var("k");
        rules.add_rule(
            call("sin", [mul([Pattern::from(ExternalMatcher::halving("k")), var("x")])]),
            mul([
                mul([Pattern::from(2), call("sin", [mul([k(), var("x")])])]),
                call("cos", [mul([k(), var("x")])]),
            ]),
            [ONEWAY],
        ).unwrap();

        // matches `sin(4*a)` and `sin(a*4)` alike
        for tree in [
            call("sin", [mul([Expr::from(4), sym("a")])]),
            call("sin", [mul([sym("a"), Expr::from(4)])]),
        ] {
            let two_a = mul([Expr::from(2), sym("a")]);
            assert_eq!(
                apply_rule_in_tree(&rules[0], &tree),
                mul([
                    mul([Expr::from(2), call("sin", [two_a.clone()])]),
                    call("cos", [two_a]),
                ]),
            );
        }
    }

    #[test]
    fn tag_policy_restricts() {
        let mut rules = RuleSet::new();
        rules.add_rule(pow(Pattern::var("x", ["complex_nonzero"]), Pattern::from(0)), Pattern::from(1), [ONEWAY])
            .unwrap();

        let zero = pow(Expr::from(0), Expr::from(0));
        assert_eq!(apply_rule_in_tree(&rules[0], &zero), Expr::from(1));
        assert_eq!(apply_rule_in_tree_with(&rules[0], &zero, &BuiltinTags), zero);
        assert_eq!(
            apply_rule_in_tree_with(&rules[0], &pow(sym("y"), Expr::from(0)), &BuiltinTags),
            Expr::from(1),
        );
    }
}
