//! Error types for batch execution

use thiserror::Error;

/// Failure produced by a job processor
///
/// Carried as data inside the batch results; it never aborts sibling jobs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct JobError(pub String);

impl JobError {
    /// Create a new job error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        JobError(message.into())
    }
}

impl From<String> for JobError {
    fn from(message: String) -> Self {
        JobError(message)
    }
}

impl From<&str> for JobError {
    fn from(message: &str) -> Self {
        JobError(message.to_string())
    }
}

impl From<serde_json::Error> for JobError {
    fn from(e: serde_json::Error) -> Self {
        JobError(e.to_string())
    }
}
