//! # tarief-formula
//!
//! Formula parser and evaluator for tarief templates.
//!
//! This crate provides:
//! - Formula parsing (text → AST) for a restricted arithmetic language:
//!   numbers, names, `+ - * /`, parentheses and unary minus
//! - Formula evaluation (AST → number) against a [`SymbolTable`]
//! - Column value resolution, binding line values and default constants
//!
//! Nothing here evaluates arbitrary code; names can only resolve to numbers.
//!
//! ## Example
//!
//! ```rust
//! use tarief_core::{Defaults, LineValues};
//! use tarief_formula::{eval_arithmetic, resolve};
//!
//! assert_eq!(eval_arithmetic("(2+3)*4"), 20.0);
//!
//! let mut values = LineValues::new();
//! values.insert("uren".into(), 8.0.into());
//! let defaults = Defaults { hourly_rate: 45.0, ..Default::default() };
//! assert_eq!(resolve("uren * uurtarief", &values, &defaults), 360.0);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod resolver;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    eval_arithmetic, evaluate, try_eval_arithmetic, EvaluationContext, SymbolTable,
};
pub use parser::{is_identifier, parse_formula};
pub use resolver::{line_symbols, resolve, resolve_expr, try_resolve};
