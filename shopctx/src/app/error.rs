//! Application error types.

use std::fmt;

use crate::client::ClientError;

/// Errors that can occur during application bootstrap.
#[derive(Debug)]
pub enum AppError {
    /// Failed to create the HTTP client.
    HttpClient(ClientError),

    /// Failed to create the typed resource client.
    ClientCreation(ClientError),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::HttpClient(e) => {
                write!(f, "Failed to create HTTP client: {}", e)
            }
            AppError::ClientCreation(e) => {
                write!(f, "Failed to create resource client: {}", e)
            }
            AppError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::HttpClient(e) => Some(e),
            AppError::ClientCreation(e) => Some(e),
            AppError::Config(_) => None,
        }
    }
}
