//! Steps recorded by the searches.

use crate::expr::Expr;
use std::fmt;

/// A step taken by one of the searches.
///
/// Rules are identified by their index in the rule slice given to the search.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The greedy simplifier rewrote the expression with a rule, strictly decreasing its measure.
    Rewrite {
        /// Index of the rule.
        rule: usize,

        /// The whole expression before the rewrite.
        before: Expr,

        /// The whole expression after the rewrite.
        after: Expr,
    },

    /// The minimax search committed to a rewrite.
    Move {
        /// Index of the rule.
        rule: usize,

        /// The worst-case measure the search expects after this move.
        score: f64,

        /// The whole expression before the move.
        before: Expr,

        /// The whole expression after the move, normalized.
        after: Expr,
    },
}

impl Step {
    /// Index of the rule that was applied.
    pub fn rule(&self) -> usize {
        match self {
            Self::Rewrite { rule, .. } | Self::Move { rule, .. } => *rule,
        }
    }

    /// The expression after the step.
    pub fn after(&self) -> &Expr {
        match self {
            Self::Rewrite { after, .. } | Self::Move { after, .. } => after,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewrite { rule, before, after } => {
                write!(f, "rule #{}: {} => {}", rule, before, after)
            },
            Self::Move { rule, score, before, after } => {
                write!(f, "rule #{} (score {}): {} => {}", rule, score, before, after)
            },
        }
    }
}
