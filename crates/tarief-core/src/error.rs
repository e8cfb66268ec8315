//! Error types for tarief-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tarief-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid template data
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}
