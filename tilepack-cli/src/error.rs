//! CLI error types.

use std::fmt;

/// Errors surfaced to the command line.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem.
    Config(String),

    /// Manifest operation failed.
    Manifest(String),

    /// Region tree operation failed.
    Regions(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Manifest(msg) => write!(f, "Manifest error: {}", msg),
            CliError::Regions(msg) => write!(f, "Region tree error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}
