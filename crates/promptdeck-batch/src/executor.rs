//! Bounded-parallel job execution with ordered result collection

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::error::JobError;
use crate::job::Job;

/// Output produced by a successful job
pub type JobOutput = serde_json::Value;

/// Default worker cap, kept low to stay inside third-party rate limits
pub const DEFAULT_MAX_WORKERS: usize = 3;

/// Caller-supplied processing function for one job
///
/// Treated as opaque and potentially slow or networked. Failures are
/// reported through the returned error; there is no per-job timeout, so a
/// hung processor holds its worker slot for the rest of the run.
#[async_trait]
pub trait JobProcessor: 'static + Sync + Send {
    async fn process(&self, job: &Job) -> Result<JobOutput, JobError>;
}

/// Result of one job, tagged with its submission position
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// The job's 1-based position in the submitted batch
    pub batch_id: usize,

    /// What the job produced
    pub outcome: Outcome,
}

/// Per-job outcome; failures carry the original job back to the caller
#[derive(Debug, Clone)]
pub enum Outcome {
    Success(JobOutput),
    Failure { error: String, job: Job },
}

impl BatchResult {
    /// Whether the job completed successfully
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    /// The successful output, if any
    pub fn output(&self) -> Option<&JobOutput> {
        match &self.outcome {
            Outcome::Success(output) => Some(output),
            Outcome::Failure { .. } => None,
        }
    }
}

/// Runs batches of independent jobs with a fixed concurrency cap
///
/// Jobs complete in non-deterministic order; the returned result list is
/// re-sorted by submission position, so output order is deterministic
/// regardless of scheduling. A failing job never aborts its siblings.
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    max_workers: usize,
}

impl Default for BatchExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}

impl BatchExecutor {
    /// Create an executor with the given worker cap, clamped to at least 1
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// The configured worker cap
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run every job to completion and return results ordered by batch_id
    pub async fn run(&self, jobs: Vec<Job>, processor: Arc<dyn JobProcessor>) -> Vec<BatchResult> {
        self.run_with_progress(jobs, processor, |_, _| {}).await
    }

    /// Like [`BatchExecutor::run`], invoking `on_progress(completed, total)`
    /// after every job finishes
    ///
    /// Progress fires in completion order, which is not deterministic across
    /// runs. The call blocks until the full result set is available; there
    /// is no partial or streaming return.
    pub async fn run_with_progress(
        &self,
        jobs: Vec<Job>,
        processor: Arc<dyn JobProcessor>,
        mut on_progress: impl FnMut(usize, usize),
    ) -> Vec<BatchResult> {
        let total = jobs.len();
        debug!("Running batch of {} jobs with {} workers", total, self.max_workers);

        // Jobs still outstanding, so tasks that die without reporting can be
        // backfilled as failures.
        let mut pending: HashMap<usize, Job> =
            jobs.iter().map(|job| (job.batch_id, job.clone())).collect();

        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();

        for job in jobs {
            let semaphore = semaphore.clone();
            let processor = processor.clone();
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return BatchResult {
                            batch_id: job.batch_id,
                            outcome: Outcome::Failure {
                                error: "worker pool shut down".to_string(),
                                job,
                            },
                        };
                    }
                };

                match processor.process(&job).await {
                    Ok(output) => BatchResult {
                        batch_id: job.batch_id,
                        outcome: Outcome::Success(output),
                    },
                    Err(e) => BatchResult {
                        batch_id: job.batch_id,
                        outcome: Outcome::Failure {
                            error: e.to_string(),
                            job,
                        },
                    },
                }
            });
        }

        let mut results = Vec::with_capacity(total);
        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    pending.remove(&result.batch_id);
                    results.push(result);
                }
                Err(e) => {
                    // A panicking processor kills its task before it can
                    // report; the job is backfilled below so the result set
                    // still covers the whole batch.
                    error!("Batch task aborted: {}", e);
                }
            }
            completed += 1;
            on_progress(completed, total);
        }

        for (_, job) in pending {
            results.push(BatchResult {
                batch_id: job.batch_id,
                outcome: Outcome::Failure {
                    error: "job task aborted before completing".to_string(),
                    job,
                },
            });
        }

        // Restore submission order regardless of completion timing
        results.sort_by_key(|result| result.batch_id);
        results
    }
}
