//! Error types for the bulwark CLI.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (stdin, files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sanitizer rejected its configuration
    #[error(transparent)]
    Sanitizer(#[from] bulwark_xss::XssError),

    /// Malformed query string
    #[error("Invalid query string: {0}")]
    Query(String),

    /// Input document is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}
