//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Validation and structural failures of the expression pipeline.
///
/// Display strings are for logs only; the front end owns user-facing text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("negative operand in expression")]
    InvalidOperand,

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("empty or invalid expression")]
    EmptyOrInvalidExpression,

    #[error("malformed expression: operator/operand mismatch")]
    MalformedExpression,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
