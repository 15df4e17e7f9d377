//! Common error types for AASD

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for AASD operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the AASD engine and service
#[derive(Error, Debug)]
pub enum Error {
    /// Product catalog missing, unreadable or malformed
    #[error("Catalog load failure ({path}): {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    /// Scale reference pixel length is zero, negative or not finite
    #[error("Invalid scale reference: pixel length must be at least 1, got {0}")]
    InvalidScaleReference(f64),

    /// Form value outside its accepted range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a catalog load error for `path`
    pub fn catalog_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::CatalogLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
