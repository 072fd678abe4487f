//! Rule-based rewriting of symbolic expressions.
//!
//! # Expressions and patterns
//!
//! An [`Expr`] is a tree of integer constants, symbols, and applications of named operators or
//! functions. Operators know whether they are commutative and / or associative. A [`Pattern`] is
//! the same kind of tree, with holes: variables that match any subtree, and external matchers
//! that run arbitrary code.
//!
//! Both can be built by hand with the functions in [`expr::build`], or parsed from infix notation
//! with [`parse_expr`] and [`parse_pattern`].
//!
//! # Rules
//!
//! A [`Rule`] rewrites subtrees matching a source pattern into a target template. When the rule
//! is built, its source is expanded into every tree that is equivalent to it under the
//! commutativity and associativity of its operators (see [`expand`]), so that `sin(x)^2 +
//! cos(x)^2` also matches `cos(a)^2 + sin(a)^2`. Rules are collected into an ordered [`RuleSet`],
//! which by default also adds the reverse of every rule.
//!
//! # Searching
//!
//! Rewriting is driven by a [`Measure`] of how simple an expression is. There are two search
//! strategies:
//!
//! - [`simplify()`] greedily keeps any rewrite that lowers the measure, until no rule helps.
//! - [`MiniMax`] looks a fixed number of rewrites ahead and commits to the rewrite with the best
//!   worst-case outcome.
//!
//! Both accept [`Transformation`]s, such as [`transform::fold_constants`], that are applied to the
//! whole expression before any rule is tried.
//!
//! ```
//! use symrw_engine::{catalog, measure::length, parse_expr, simplify, Expr};
//!
//! let rules = catalog::trig_rules().unwrap();
//! let expr = parse_expr("cos(2*x)^2 + sin(2*x)^2").unwrap();
//! assert_eq!(simplify(&expr, &rules, &[], &length), Expr::from(1));
//! ```

pub mod catalog;
pub mod convert;
pub mod error;
pub mod expand;
pub mod expr;
pub mod matcher;
pub mod measure;
pub mod minimax;
pub mod pattern;
pub mod primitive;
pub mod rewrite;
pub mod rule;
pub mod simplify;
pub mod step;
pub mod step_collector;
pub mod transform;

pub use convert::{parse_expr, parse_pattern};
pub use expr::{Application, Expr, GroupId};
pub use matcher::{match_tree, replace_in_tree, Bindings};
pub use measure::Measure;
pub use minimax::{minimax, MiniMax, MiniMaxOptions, MiniMaxOptionsBuilder};
pub use pattern::{ExternalMatcher, Pattern, PatternVar};
pub use rewrite::apply_rule_in_tree;
pub use rule::{add_rule, filter_rules, Rule, RuleSet};
pub use simplify::{simplify, simplify_step, simplify_with, simplify_with_steps, SimplifyOptions};
pub use step::Step;
pub use step_collector::StepCollector;
pub use transform::Transformation;
