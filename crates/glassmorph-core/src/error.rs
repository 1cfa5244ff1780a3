//! Error types for Glassmorph.

use thiserror::Error;

/// Main error type for Glassmorph operations.
#[derive(Error, Debug)]
pub enum GlassmorphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Glassmorph operations.
pub type Result<T> = std::result::Result<T, GlassmorphError>;
