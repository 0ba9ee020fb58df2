//! Error types for CLI utilities.

use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The global tracing subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    Tracing(#[from] TryInitError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
