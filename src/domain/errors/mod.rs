// Domain errors - Validation failures raised before any process is started

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unknown extension or malformed edit syntax
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Trim window that is empty or reversed
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),

    /// Edit is not available for this kind of media
    #[error("Unsupported edit: {0}")]
    UnsupportedEdit(String),

    /// Compatibility rules are malformed
    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    #[error("Probe failed: {0}")]
    ProbeFailed(String),

    /// An external process could not be started or waited on
    #[error("Processing error: {0}")]
    ProcessingError(String),
}
