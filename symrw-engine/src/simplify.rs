//! Greedy simplification.
//!
//! This module provides the [`simplify`] function, which repeatedly rewrites an expression with a
//! set of rules, keeping a rewrite only if it makes the expression strictly simpler according to
//! a [`Measure`] (lower is simpler). It stops as soon as a whole pass over the rules fails to
//! improve the expression.
//!
//! The loop is not bounded in general: a rule set whose rewrites keep decreasing the measure
//! forever will never stop. Use [`simplify_with`] with [`SimplifyOptions::max_passes`] to put a
//! cap on the number of passes.

use crate::{
    expr::Expr,
    matcher::IgnoreTags,
    measure::Measure,
    rewrite::try_apply_rule,
    rule::Rule,
    step::Step,
    step_collector::StepCollector,
    transform::{apply_all, Transformation},
};
use std::mem;
use tracing::{debug, trace};

/// Options for [`simplify_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// The maximum number of passes to run. [`None`] runs until no pass improves the expression.
    pub max_passes: Option<usize>,
}

impl SimplifyOptions {
    /// Options that run at most `max_passes` passes.
    pub fn bounded(max_passes: usize) -> Self {
        Self { max_passes: Some(max_passes) }
    }
}

/// One pass of the simplifier.
fn inner_simplify_step(
    expr: Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut expr = apply_all(expr, transformations);
    let mut current = measure.measure(&expr);

    for (index, rule) in rules.iter().enumerate() {
        let Some(candidate) = try_apply_rule(rule, &expr, &IgnoreTags) else {
            continue;
        };

        // ties are rejected, so a rule cannot flip-flop between two equally simple forms
        let score = measure.measure(&candidate);
        if score < current {
            trace!(rule = index, from = current, to = score, "accepted `{}`", candidate);
            let before = mem::replace(&mut expr, candidate);
            step_collector.push(Step::Rewrite { rule: index, before, after: expr.clone() });
            current = score;
        }
    }

    expr
}

/// Runs a single pass of the simplifier.
///
/// Every transformation is applied first, in order. Then each rule, in order, is applied once
/// (see [`crate::rewrite::apply_rule_in_tree`]); its result replaces the expression only if it
/// has a strictly lower measure.
pub fn simplify_step(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
) -> Expr {
    inner_simplify_step(expr.clone(), rules, transformations, measure, &mut ())
}

/// Base implementation of the simplification loop.
fn inner_simplify_with(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    let mut expr = expr.clone();
    let mut current = measure.measure(&expr);
    let mut passes = 0;

    while options.max_passes.map_or(true, |max| passes < max) {
        // steps are only kept if the pass as a whole is kept
        let mut steps = Vec::new();
        let next = inner_simplify_step(expr.clone(), rules, transformations, measure, &mut steps);
        passes += 1;

        let score = measure.measure(&next);
        if score >= current {
            debug!(pass = passes, measure = current, "no improvement, stopping");
            break;
        }

        debug!(pass = passes, from = current, to = score, "simplified to `{}`", next);
        for step in steps {
            step_collector.push(step);
        }
        expr = next;
        current = score;
    }

    expr
}

/// Simplifies the expression by running passes of [`simplify_step`] until one fails to strictly
/// improve the measure. Returns the expression from before that pass.
pub fn simplify(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
) -> Expr {
    inner_simplify_with(expr, rules, transformations, measure, &SimplifyOptions::default(), &mut ())
}

/// Simplifies the expression like [`simplify`], with the given options. Every rewrite kept by the
/// simplifier is recorded in the step collector.
pub fn simplify_with(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Expr {
    inner_simplify_with(expr, rules, transformations, measure, options, step_collector)
}

/// Simplifies the expression like [`simplify`], and also returns the rewrites that were kept.
pub fn simplify_with_steps(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify_with(
        expr,
        rules,
        transformations,
        measure,
        &SimplifyOptions::default(),
        &mut steps,
    );
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        expr::build::*,
        measure::length,
        pattern::Pattern,
        rule::{RuleSet, ONEWAY},
        transform::fold_constants,
    };
    use pretty_assertions::assert_eq;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn var(name: &str) -> Pattern {
        Pattern::var(name, ["complex"])
    }

    fn unwrap_f() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.add_rule(call("f", [var("x")]), var("x"), [ONEWAY]).unwrap();
        rules
    }

    #[test]
    fn pythagorean_identity() {
        let mut rules = RuleSet::new();
        rules.add_rule(
            add([pow(call("sin", [var("x")]), Pattern::from(2)), pow(call("cos", [var("x")]), Pattern::from(2))]),
            Pattern::from(1),
            ["trig"],
        ).unwrap();

        let two_x = mul([Expr::from(2), sym("x")]);
        let expr = add([
            pow(call("cos", [two_x.clone()]), Expr::from(2)),
            pow(call("sin", [two_x]), Expr::from(2)),
        ]);
        assert_eq!(simplify(&expr, &rules, &[], &length), Expr::from(1));
    }

    #[test]
    fn transformations_run_first() {
        let mut rules = RuleSet::new();
        rules.add_rule(mul([Pattern::from(1), var("x")]), var("x"), [ONEWAY]).unwrap();

        // `(2-1)*y` only becomes `1*y` after folding
        let fold: [&dyn Transformation; 1] = [&fold_constants];
        let expr = mul([sub(Expr::from(2), Expr::from(1)), sym("y")]);
        assert_eq!(simplify_step(&expr, &rules, &fold, &length), sym("y"));
        assert_eq!(simplify_step(&expr, &rules, &[], &length), expr);
    }

    #[test]
    fn ties_are_rejected() {
        let mut rules = RuleSet::new();
        rules.add_rule(add([var("x"), var("y")]), add([var("y"), var("x")]), [ONEWAY]).unwrap();

        let expr = add([sym("a"), sym("b")]);
        assert_eq!(simplify(&expr, &rules, &[], &length), expr);
    }

    #[test]
    fn step_is_idempotent_at_fixpoint() {
        let rules = unwrap_f();
        let transformations: [&dyn Transformation; 1] = [&fold_constants];
        let expr = call("g", [add([Expr::from(1), Expr::from(2)])]);

        let once = simplify_step(&expr, &rules, &transformations, &length);
        assert_eq!(once, call("g", [Expr::from(3)]));
        assert_eq!(simplify_step(&once, &rules, &transformations, &length), once);
    }

    #[test]
    fn unbounded_runs_to_fixpoint() {
        let rules = unwrap_f();
        let expr = call("f", [call("f", [call("f", [sym("a")])])]);
        let (simplified, steps) = simplify_with_steps(&expr, &rules, &[], &length);
        assert_eq!(simplified, sym("a"));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Step::Rewrite {
            rule: 0,
            before: expr.clone(),
            after: call("f", [call("f", [sym("a")])]),
        });
        assert_eq!(steps[2].after(), &sym("a"));
    }

    #[test]
    fn bounded_passes() {
        let rules = unwrap_f();
        let expr = call("f", [call("f", [call("f", [sym("a")])])]);

        let mut steps = Vec::new();
        let simplified = simplify_with(&expr, &rules, &[], &length, &SimplifyOptions::bounded(1), &mut steps);
        assert_eq!(simplified, call("f", [call("f", [sym("a")])]));
        assert_eq!(steps.len(), 1);

        let simplified = simplify_with(&expr, &rules, &[], &length, &SimplifyOptions::bounded(0), &mut ());
        assert_eq!(simplified, expr);
    }

    #[test]
    fn folding_without_rules() {
        let fold: [&dyn Transformation; 1] = [&fold_constants];
        let expr = add([Expr::from(10), Expr::from(10)]);
        assert_eq!(simplify(&expr, &[], &fold, &length), Expr::from(20));

        let expr = call("g", [sym("a")]);
        let mut steps = Vec::new();
        let simplified = simplify_with(&expr, &[], &fold, &length, &SimplifyOptions::default(), &mut steps);
        assert_eq!(simplified, expr);
        assert!(steps.is_empty());
    }
}
