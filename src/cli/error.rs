//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{}: {input}", describe(.source))]
    Expression {
        input: String,
        #[source]
        source: DomainError,
    },

    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("no expression given on stdin")]
    NoInput,

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// User-facing text for each expression failure.
pub fn describe(error: &DomainError) -> &'static str {
    match error {
        DomainError::InvalidOperand => "negative numbers are not allowed",
        DomainError::UnbalancedParentheses => "parentheses are not balanced",
        DomainError::EmptyOrInvalidExpression => "incomplete or invalid expression",
        DomainError::MalformedExpression => "operators and operands do not match up",
    }
}

impl CliError {
    pub fn expression(input: impl Into<String>, source: DomainError) -> Self {
        Self::Expression {
            input: input.into(),
            source,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Expression { .. } => crate::exitcode::DATAERR,
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::NoInput => crate::exitcode::NOINPUT,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Application(
                ApplicationError::Config { .. } | ApplicationError::ConfigNotFound(_),
            ) => crate::exitcode::CONFIG,
        }
    }
}
