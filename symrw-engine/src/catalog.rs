//! Ready-made rule sets.
//!
//! Rules are written in infix notation and parsed with [`parse_pattern`], so every identifier is
//! a pattern variable. Rules that need anything else, such as a variable with a different tag or
//! an external matcher, are built by hand.

use crate::{
    convert::parse_pattern,
    expr::build::{call, mul, pow},
    pattern::{ExternalMatcher, Pattern},
    rule::{RuleSet, ONEWAY},
};
use symrw_error::Error;

/// Tag of the trigonometric rules.
pub const TRIG: &str = "trig";

/// Tag of the power rules.
pub const POW: &str = "pow";

/// Adds a rule written in infix notation.
fn add_parsed(rules: &mut RuleSet, source: &str, target: &str, tags: &[&str]) -> Result<(), Error> {
    rules.add_rule(parse_pattern(source)?, parse_pattern(target)?, tags.iter().copied())
}

/// Trigonometric identities, in both directions:
///
/// - `tan(x) = sin(x) / cos(x)`
/// - `cot(x) = cos(x) / sin(x)`
/// - `sin(x + y) = sin(x) * cos(y) + cos(x) * sin(y)`
/// - `cos(x + y) = cos(x) * cos(y) - sin(x) * sin(y)`
/// - `sin(x)^2 + cos(x)^2 = 1`
///
/// The reverse of the last identity never applies, since nothing in `1` says what `x` is.
pub fn trig_rules() -> Result<RuleSet, Error> {
    let mut rules = RuleSet::new();
    add_parsed(&mut rules, "tan(x)", "sin(x) / cos(x)", &[TRIG])?;
    add_parsed(&mut rules, "cot(x)", "cos(x) / sin(x)", &[TRIG])?;
    add_parsed(&mut rules, "sin(x + y)", "sin(x) * cos(y) + cos(x) * sin(y)", &[TRIG])?;
    add_parsed(&mut rules, "cos(x + y)", "cos(x) * cos(y) - sin(x) * sin(y)", &[TRIG])?;
    add_parsed(&mut rules, "sin(x)^2 + cos(x)^2", "1", &[TRIG])?;
    Ok(rules)
}

/// Power identities, one way only:
///
/// - `1^x = 1`
/// - `x^1 = x`
/// - `x^0 = 1`, for `x` tagged `complex_nonzero`
/// - `x^a * x^b = x^(a + b)`
/// - `(x * y)^a = x^a * y^a`
/// - `(x^a)^b = x^(a * b)`
pub fn pow_rules() -> Result<RuleSet, Error> {
    let mut rules = RuleSet::new();
    add_parsed(&mut rules, "1^x", "1", &[POW, ONEWAY])?;
    add_parsed(&mut rules, "x^1", "x", &[POW, ONEWAY])?;
    rules.add_rule(
        pow(Pattern::var("x", ["complex_nonzero"]), Pattern::from(0)),
        Pattern::from(1),
        [POW, ONEWAY],
    )?;
    add_parsed(&mut rules, "x^a * x^b", "x^(a + b)", &[POW, ONEWAY])?;
    add_parsed(&mut rules, "(x * y)^a", "x^a * y^a", &[POW, ONEWAY])?;
    add_parsed(&mut rules, "(x^a)^b", "x^(a * b)", &[POW, ONEWAY])?;
    Ok(rules)
}

/// Basic simplifications, one way only:
///
/// - `1 * x = x`
/// - `sin(2k * x) = 2 * sin(k * x) * cos(k * x)`, for any even integer `2k`
pub fn basic_rules() -> Result<RuleSet, Error> {
    let mut rules = RuleSet::new();
    add_parsed(&mut rules, "1 * x", "x", &[TRIG, ONEWAY])?;
    rules.add_rule(
        call("sin", [mul([Pattern::from(ExternalMatcher::halving("k")), Pattern::var("x", ["complex"])])]),
        parse_pattern("2 * sin(k * x) * cos(k * x)")?,
        [TRIG, ONEWAY],
    )?;
    Ok(rules)
}

/// Every rule of [`trig_rules`], [`pow_rules`] and [`basic_rules`], in that order.
pub fn all_rules() -> Result<RuleSet, Error> {
    let mut rules = trig_rules()?;
    rules.extend_from(pow_rules()?);
    rules.extend_from(basic_rules()?);
    Ok(rules)
}
