//! CLI error types.

use std::fmt;

/// Errors surfaced to the terminal with a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded or written.
    Config(String),

    /// SDK bootstrap failed.
    Startup(String),

    /// A mutation or query against the API failed.
    Api(String),

    /// A command-line argument was malformed.
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Startup(msg) => write!(f, "Failed to start: {}", msg),
            CliError::Api(msg) => write!(f, "API request failed: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        assert!(CliError::Config("x".into()).to_string().contains("Configuration"));
        assert!(CliError::Api("x".into()).to_string().contains("API request"));
    }
}
