//! Error types for flick_carousel

use flick_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while mounting a carousel
#[derive(Error, Debug)]
pub enum CarouselError {
    /// The host lacks capabilities the carousel needs; nothing was attached
    #[error("Host not supported, missing: {0}")]
    Unsupported(String),

    /// The container has no inner element to move
    #[error("No inner element found")]
    MissingInner,

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host rejected an operation
    #[error("Host error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type for flick_carousel operations
pub type Result<T> = std::result::Result<T, CarouselError>;
