//! Platform error types

use thiserror::Error;

/// Host-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// An element handle does not refer to a live element
    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
