//! Batch result aggregation

use serde::Serialize;

use crate::executor::BatchResult;

/// Aggregate view of one finished batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Number of results, equal to the number of submitted jobs
    pub total_jobs: usize,

    /// Jobs that completed successfully
    pub successful: usize,

    /// Jobs that failed
    pub failed: usize,

    /// Successful share in percent; 0 for an empty batch
    pub success_rate: f64,

    /// Batch ids of the failed jobs, ascending
    pub failed_batch_ids: Vec<usize>,
}

/// Summarize a finished batch; pure aggregation with no side effects
pub fn summarize(results: &[BatchResult]) -> BatchSummary {
    let successful = results.iter().filter(|r| r.is_success()).count();

    let mut failed_batch_ids: Vec<usize> = results
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| r.batch_id)
        .collect();
    failed_batch_ids.sort_unstable();

    let success_rate = if results.is_empty() {
        0.0
    } else {
        successful as f64 / results.len() as f64 * 100.0
    };

    BatchSummary {
        total_jobs: results.len(),
        successful,
        failed: failed_batch_ids.len(),
        success_rate,
        failed_batch_ids,
    }
}
