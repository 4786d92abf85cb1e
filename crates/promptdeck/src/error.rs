//! Error types for the promptdeck library

use thiserror::Error;

/// Store-specific errors
///
/// Public store operations report failure through their return values;
/// these errors surface at the storage trait seam and in logs.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
