//! Bounded lookahead search over rule applications.
//!
//! The greedy simplifier only ever takes a rewrite that immediately improves the expression, so it
//! cannot get past a rewrite that first makes things worse. [`MiniMax`] instead looks a fixed
//! number of rewrites ahead. It treats the choice of rule as a two-player game: at odd plies the
//! search picks the rule with the best outcome, and at even plies it assumes the worst outcome,
//! as if an opponent picked the rule. The move actually made is the first-ply rewrite with the
//! best worst-case outcome.
//!
//! Unlike [`crate::simplify`], the measure is **maximized**. Use a negated measure, such as
//! [`crate::measure::neg_length`], to search for simpler expressions.
//!
//! Every ply applies every rule, so each move costs `|rules|^depth` rule applications. There is no
//! pruning.

use crate::{
    expr::Expr,
    measure::Measure,
    rewrite::apply_rule_in_tree,
    rule::Rule,
    step::Step,
    step_collector::StepCollector,
    transform::{apply_all, Transformation},
};
use tracing::{debug, trace};

/// Options for the [`MiniMax`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniMaxOptions {
    /// The maximum number of moves to make.
    pub iterations: usize,

    /// The search stops as soon as the measure of the expression reaches this value.
    pub eps: f64,

    /// The number of plies to look ahead, including the move itself. Values below 1 are treated
    /// as 1.
    pub depth: usize,
}

impl Default for MiniMaxOptions {
    fn default() -> Self {
        Self {
            iterations: 5,
            eps: 100.0,
            depth: 3,
        }
    }
}

impl MiniMaxOptions {
    /// Wraps the given [`MiniMaxOptions`] into a builder for further customization.
    pub fn into_builder(self) -> MiniMaxOptionsBuilder {
        MiniMaxOptionsBuilder(self)
    }
}

/// A builder for [`MiniMaxOptions`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MiniMaxOptionsBuilder(MiniMaxOptions);

impl MiniMaxOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of moves.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.0.iterations = iterations;
        self
    }

    /// Sets the measure at which the search stops.
    pub fn eps(mut self, eps: f64) -> Self {
        self.0.eps = eps;
        self
    }

    /// Sets the number of plies to look ahead.
    pub fn depth(mut self, depth: usize) -> Self {
        self.0.depth = depth;
        self
    }

    /// Builds the options.
    pub fn build(self) -> MiniMaxOptions {
        self.0
    }
}

/// The state of a minimax search: the current expression, and everything needed to move it.
pub struct MiniMax<'a> {
    root: Expr,
    rules: &'a [Rule],
    transformations: &'a [&'a dyn Transformation],
    measure: &'a dyn Measure,
    options: MiniMaxOptions,
}

impl<'a> MiniMax<'a> {
    /// Creates a search starting from the given expression.
    pub fn new(
        root: Expr,
        rules: &'a [Rule],
        transformations: &'a [&'a dyn Transformation],
        measure: &'a dyn Measure,
        options: MiniMaxOptions,
    ) -> Self {
        Self { root, rules, transformations, measure, options }
    }

    /// The current expression.
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Consumes the search, returning the current expression.
    pub fn into_root(self) -> Expr {
        self.root
    }

    /// Applies every transformation to the current expression.
    pub fn normalize(&mut self) {
        let root = std::mem::replace(&mut self.root, Expr::from(0));
        self.root = apply_all(root, self.transformations);
    }

    /// Scores a node reached after `ply` rewrites.
    ///
    /// Nodes at the last ply are scored by the measure. Above that, a node reached after an odd
    /// number of rewrites takes the best score of its children, and one reached after an even
    /// number takes the worst.
    fn score(&self, node: &Expr, ply: usize) -> f64 {
        if ply >= self.options.depth.max(1) {
            return self.measure.measure(node);
        }

        let scores = self.rules.iter()
            .map(|rule| self.score(&apply_rule_in_tree(rule, node), ply + 1));
        if ply % 2 == 1 {
            scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.fold(f64::INFINITY, f64::min)
        }
    }

    /// Makes a single move: normalizes the expression, rewrites it with the rule whose rewrite
    /// has the best worst-case outcome, and normalizes it again. Ties go to the earliest rule.
    ///
    /// Returns the move made, or [`None`] if there are no rules.
    pub fn next_move(&mut self) -> Option<Step> {
        self.normalize();

        let mut best: Option<(usize, f64, Expr)> = None;
        for (index, rule) in self.rules.iter().enumerate() {
            let candidate = apply_rule_in_tree(rule, &self.root);
            let score = self.score(&candidate, 1);
            trace!(rule = index, score, "candidate `{}`", candidate);

            if best.as_ref().map_or(true, |(_, best_score, _)| score > *best_score) {
                best = Some((index, score, candidate));
            }
        }

        let (rule, score, candidate) = best?;
        let before = std::mem::replace(&mut self.root, candidate);
        self.normalize();
        Some(Step::Move { rule, score, before, after: self.root.clone() })
    }

    /// Normalizes the expression, then makes moves while its measure is below
    /// [`MiniMaxOptions::eps`], up to [`MiniMaxOptions::iterations`] moves. Every move is
    /// recorded in the step collector.
    ///
    /// Returns the final expression.
    pub fn run_with(&mut self, step_collector: &mut dyn StepCollector<Step>) -> &Expr {
        self.normalize();

        let mut iteration = 0;
        while iteration < self.options.iterations {
            let measure = self.measure.measure(&self.root);
            if measure >= self.options.eps {
                debug!(iteration, measure, eps = self.options.eps, "target reached");
                break;
            }

            let Some(step) = self.next_move() else {
                break;
            };
            debug!(iteration, "{}", step);
            step_collector.push(step);
            iteration += 1;
        }

        &self.root
    }

    /// Makes moves like [`MiniMax::run_with`], discarding the steps.
    pub fn run(&mut self) -> &Expr {
        self.run_with(&mut ())
    }
}

/// Runs a [`MiniMax`] search from the given expression and returns the final expression.
pub fn minimax(
    expr: &Expr,
    rules: &[Rule],
    transformations: &[&dyn Transformation],
    measure: &dyn Measure,
    options: MiniMaxOptions,
) -> Expr {
    let mut search = MiniMax::new(expr.clone(), rules, transformations, measure, options);
    search.run();
    search.into_root()
}
