//! Associative-commutative expansion of patterns.
//!
//! Matching is purely structural: a pattern `x + y` only matches an application of `+` whose
//! first argument matches `x` and whose second argument matches `y`. To let a rule apply no matter
//! how its operands are ordered or grouped, the left-hand side of every rule is expanded once, at
//! construction time, into every tree that is equivalent to it under commutativity and
//! associativity. Matching then tries each variant in turn.
//!
//! The expansion works in three stages:
//!
//! 1. [`flatten`] merges nested applications of the same associative operator into one n-ary
//!    application: `a + (b + c)` becomes `+(a, b, c)`.
//! 2. For commutative applications, every permutation of the arguments is taken.
//! 3. For associative applications with more arguments than they were built with, every way of
//!    regrouping the arguments back into applications of the declared arity is enumerated by
//!    [`generate_assoc_trees`].
//!
//! The number of variants grows factorially with the number of arguments of a commutative
//! operator, so rules should keep their left-hand sides small.

use crate::{
    error::ArityMismatch,
    expr::{Application, Node},
};
use symrw_error::Error;
use tracing::warn;

/// Merges nested applications of the same associative operator into a single application,
/// recursively.
///
/// A child is merged into its parent when both have the same name and the same associativity
/// group; its arguments are spliced in place of the child, depth-first, left-to-right:
///
/// `+(1, +(2, +(3, 4)))` becomes `+(1, 2, 3, 4)`.
///
/// Returns an [`ArityMismatch`] error if a child would be merged but was built with a different
/// number of arguments than its parent.
pub fn flatten<T: Node>(tree: T) -> Result<T, Error> {
    let mut app = match tree.into_application() {
        Ok(app) => app,
        Err(leaf) => return Ok(leaf),
    };

    let mut new_args = Vec::with_capacity(app.args.len());
    for arg in std::mem::take(&mut app.args) {
        match flatten(arg)?.into_application() {
            Ok(child) if app.merges_with(&child) => {
                if child.declared_arity != app.declared_arity {
                    warn!(
                        name = %app.name,
                        expected = app.declared_arity,
                        found = child.declared_arity,
                        "same associative operator appears with different numbers of arguments",
                    );
                    return Err(Error::spanless(ArityMismatch {
                        name: app.name.clone(),
                        expected: app.declared_arity,
                        found: child.declared_arity,
                    }));
                }
                new_args.extend(child.args);
            },
            Ok(child) => new_args.push(T::from_application(child)),
            Err(leaf) => new_args.push(leaf),
        }
    }

    Ok(T::from_application(app.with_args(new_args)))
}

/// Folds the leftmost `declared_arity` arguments into a new application built from `template`,
/// repeatedly, until no more than `declared_arity` arguments remain. This is the inverse of
/// [`flatten`], producing the leftmost bracketing:
///
/// `[1, 2, 3, 4]` with a binary `+` becomes `[+(+(1, 2), 3), 4]`.
///
/// Templates with a declared arity below 2 cannot group anything, so the arguments are returned
/// as they are.
pub fn unflatten<T: Node>(args: Vec<T>, template: &Application<T>) -> Vec<T> {
    let arity = template.declared_arity;
    if arity < 2 {
        return args;
    }

    let mut args = args;
    while args.len() > arity {
        let rest = args.split_off(arity);
        let folded = T::from_application(template.with_args(args));
        args = std::iter::once(folded).chain(rest).collect();
    }
    args
}

/// Like [`unflatten`], but enumerates every regrouping instead of just the leftmost one.
///
/// Each step folds one contiguous window of exactly `declared_arity` arguments into a new
/// application built from `template`; this is repeated, for every window, until exactly
/// `declared_arity` arguments remain. Each result is one argument list for the regrouped
/// application. Duplicates reached through different sequences of folds are reported once, in
/// the order they are first reached.
///
/// For a binary operator and `[a, b, c]`, the results are `[+(a, b), c]` and `[a, +(b, c)]`.
pub fn generate_assoc_trees<T: Node>(args: Vec<T>, template: &Application<T>) -> Vec<Vec<T>> {
    let arity = template.declared_arity;
    if arity < 2 {
        return vec![args];
    }

    let mut results: Vec<Vec<T>> = Vec::new();
    let mut worklist = vec![args];

    while let Some(args) = worklist.pop() {
        if args.len() == arity {
            if !results.contains(&args) {
                results.push(args);
            }
            continue;
        }

        // lists that are already too short cannot reach the declared arity
        if args.len() < arity {
            continue;
        }

        // pushed in reverse so that the leftmost window is explored first
        for start in (0..=args.len() - arity).rev() {
            let mut folded = args[..start].to_vec();
            folded.push(T::from_application(template.with_args(args[start..start + arity].to_vec())));
            folded.extend_from_slice(&args[start + arity..]);
            worklist.push(folded);
        }
    }

    results
}

/// Returns every permutation of the given items, in lexicographic order of their positions.
fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut indices = (0..items.len()).collect::<Vec<_>>();
    let mut result = Vec::new();

    loop {
        result.push(indices.iter().map(|&i| items[i].clone()).collect());

        // find the next permutation of the indices, or stop at the last one
        let Some(pivot) = indices.windows(2).rposition(|pair| pair[0] < pair[1]) else {
            break;
        };
        let Some(successor) = indices.iter().rposition(|&i| i > indices[pivot]) else {
            break;
        };
        indices.swap(pivot, successor);
        indices[pivot + 1..].reverse();
    }

    result
}

/// Pushes `item` onto `items` unless an equal item is already present.
fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Expands an already flattened node.
fn expand<T: Node>(node: &T) -> Vec<T> {
    let Some(app) = node.as_application() else {
        return vec![node.clone()];
    };

    // cross product of the expansions of every argument
    let mut arg_lists: Vec<Vec<T>> = vec![Vec::with_capacity(app.args.len())];
    for arg in &app.args {
        let alternatives = expand(arg);
        let mut next = Vec::with_capacity(arg_lists.len() * alternatives.len());
        for alternative in &alternatives {
            for prefix in &arg_lists {
                let mut list = prefix.clone();
                list.push(alternative.clone());
                next.push(list);
            }
        }
        arg_lists = next;
    }

    let mut variants = Vec::new();
    for args in arg_lists {
        let orderings = if app.commutative {
            permutations(&args)
        } else {
            vec![args]
        };

        for ordering in orderings {
            if app.assoc.is_some() && ordering.len() > app.declared_arity {
                for grouped in generate_assoc_trees(ordering, app) {
                    push_unique(&mut variants, T::from_application(app.with_args(grouped)));
                }
            } else {
                push_unique(&mut variants, T::from_application(app.with_args(ordering)));
            }
        }
    }

    variants
}

/// Returns every tree equivalent to `pattern` under the commutativity and associativity of its
/// operators.
///
/// The pattern is flattened first. Then, bottom-up, each application takes the cross product of
/// its arguments' variants, every permutation of them if it is commutative, and every regrouping
/// if it is associative and has more arguments than it was built with. The flattened pattern
/// itself is always among the results.
pub fn generate_patterns<T: Node>(pattern: &T) -> Result<Vec<T>, Error> {
    let flat = flatten(pattern.clone())?;
    let mut variants = expand(&flat);
    push_unique(&mut variants, flat);
    Ok(variants)
}
