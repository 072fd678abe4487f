//! Infix expression parser for `symrw`.
//!
//! The parser understands integer literals, identifiers, the binary operators `+ - * / % ^`,
//! unary negation, parentheses, and named function application with comma-separated
//! arguments (`f(a, b)`). It produces a spanned abstract syntax tree ([`parser::ast::Expr`]);
//! turning that tree into something the rewriting engine can work with is the job of
//! `symrw-engine`.
//!
//! ```
//! use symrw_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("sin(2*x)^2 + 1").try_parse_full::<Expr>().unwrap();
//! assert!(matches!(expr, Expr::Binary(_)));
//! ```

pub mod parser;
pub mod tokenizer;
