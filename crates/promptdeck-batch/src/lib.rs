//! Bounded-parallel batch execution for prompt generation jobs.
//!
//! Jobs are independent parameter sets run against a caller-supplied
//! processor with a fixed worker cap; per-job failures are captured as data
//! and the collected results come back ordered by submission position.

pub mod error;
pub mod executor;
pub mod job;
pub mod summary;

// Re-export core types
pub use error::JobError;
pub use executor::{
    BatchExecutor, BatchResult, DEFAULT_MAX_WORKERS, JobOutput, JobProcessor, Outcome,
};
pub use job::{
    Job, JobParams, build_jobs, emotion_variations, intensity_variations, mixed_variations,
    model_variations,
};
pub use summary::{BatchSummary, summarize};

/// Get the library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
