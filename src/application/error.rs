//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures outside the expression pipeline: loading and rendering settings.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),
}
