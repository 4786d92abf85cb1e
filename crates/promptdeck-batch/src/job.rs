//! Batch jobs and variation set builders

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Free-form parameter map for one generation request
pub type JobParams = Map<String, Value>;

/// One unit of batch work
///
/// A parameter set plus its 1-based position in the submitted batch.
/// Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// 1-based position in the submitted job list
    pub batch_id: usize,

    /// Complete parameter set for this job
    pub params: JobParams,
}

/// Build jobs by overlaying each variation onto the base parameters
///
/// Keys present in a variation replace the base values; jobs are numbered in
/// variation order. Nothing is executed.
pub fn build_jobs(base: &JobParams, variations: &[JobParams]) -> Vec<Job> {
    variations
        .iter()
        .enumerate()
        .map(|(i, variation)| {
            let mut params = base.clone();
            for (key, value) in variation {
                params.insert(key.clone(), value.clone());
            }
            Job {
                batch_id: i + 1,
                params,
            }
        })
        .collect()
}

/// Variation set covering multiple emotions at one intensity
pub fn emotion_variations(emotions: &[&str], intensity: &str) -> Vec<JobParams> {
    emotions
        .iter()
        .map(|emotion| {
            let mut params = JobParams::new();
            params.insert("emotion".to_string(), json!(emotion));
            params.insert("intensity".to_string(), json!(intensity));
            params.insert(
                "variation_name".to_string(),
                json!(format!("{} ({})", emotion, intensity)),
            );
            params
        })
        .collect()
}

/// Variation set covering one emotion at multiple intensities
pub fn intensity_variations(emotion: &str, intensities: &[&str]) -> Vec<JobParams> {
    intensities
        .iter()
        .map(|intensity| {
            let mut params = JobParams::new();
            params.insert("emotion".to_string(), json!(emotion));
            params.insert("intensity".to_string(), json!(intensity));
            params.insert(
                "variation_name".to_string(),
                json!(format!("{} - {}", emotion, intensity)),
            );
            params
        })
        .collect()
}

/// Variation set covering multiple target models
pub fn model_variations(models: &[&str]) -> Vec<JobParams> {
    models
        .iter()
        .map(|model| {
            let mut params = JobParams::new();
            params.insert("model".to_string(), json!(model));
            params.insert(
                "variation_name".to_string(),
                json!(format!("{} optimized", model)),
            );
            params
        })
        .collect()
}

/// Variation set mixing one primary emotion with several secondaries
pub fn mixed_variations(
    primary_emotion: &str,
    secondary_emotions: &[&str],
    primary_weight: f64,
) -> Vec<JobParams> {
    secondary_emotions
        .iter()
        .map(|secondary| {
            let mut params = JobParams::new();
            params.insert("primary_emotion".to_string(), json!(primary_emotion));
            params.insert("secondary_emotion".to_string(), json!(secondary));
            params.insert("primary_weight".to_string(), json!(primary_weight));
            params.insert(
                "variation_name".to_string(),
                json!(format!(
                    "{}% {} + {}% {}",
                    (primary_weight * 100.0) as u32,
                    primary_emotion,
                    ((1.0 - primary_weight) * 100.0) as u32,
                    secondary
                )),
            );
            params
        })
        .collect()
}
