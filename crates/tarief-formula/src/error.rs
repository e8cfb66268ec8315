//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula contains no tokens
    #[error("Empty formula")]
    Empty,

    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Name that is neither a column nor a default constant
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result overflowed to infinity or NaN
    #[error("Result is not a finite number")]
    NonFinite,
}
