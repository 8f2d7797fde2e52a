//! Error handling module for Splicer

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Splicer operations
#[derive(Error, Debug)]
pub enum SplicerError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Compatibility rules could not be turned into a graph
    #[error("Invalid compatibility rules: {message}")]
    RuleConfigError { message: String },

    /// Configuration file or override could not be applied
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// A stage invocation exited unsuccessfully
    #[error("Stage {stage} failed (exit code {exit_code:?}): {output}")]
    StageFailed {
        stage: usize,
        exit_code: Option<i32>,
        output: String,
    },

    /// Output file could not be moved into place
    #[error("Failed to write output file: {message}")]
    OutputError { message: String },

    /// Concatenation could not be performed
    #[error("Concatenation failed: {message}")]
    ConcatError { message: String },

    /// Domain validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Splicer operations
pub type SplicerResult<T> = std::result::Result<T, SplicerError>;
