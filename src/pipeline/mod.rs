//! Stage orchestration
//!
//! Runs normalize -> standstill -> interpolate -> reduce over an already
//! loaded sample log. Each stage consumes the previous stage's output and
//! finishes before the next begins.

pub mod stage;

pub use stage::{PipelineError, PipelineResult, Stage};

use crate::capture::types::Sample;
use crate::config::TrajectoryConfig;
use crate::processing::{
    detect_standstills, keep_indices, normalize_times, reduce_path, resample_path, SmoothSample,
    StandstillInterval,
};
use std::collections::BTreeSet;

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized samples (first timestamp is zero)
    pub samples: Vec<Sample>,
    /// Standstill intervals as indices into `samples`
    pub standstills: Vec<StandstillInterval>,
    /// Resampled spline path
    pub smooth: Vec<SmoothSample>,
    /// Indices into `smooth` that reduction had to preserve
    pub keep_indices: BTreeSet<usize>,
    /// Final reduced path
    pub reduced: Vec<SmoothSample>,
}

/// Run every processing stage over deduplicated, time-ordered samples
pub fn run_pipeline(
    samples: Vec<Sample>,
    config: &TrajectoryConfig,
) -> PipelineResult<PipelineOutput> {
    config.validate()?;

    let samples = normalize_times(samples);
    tracing::debug!(stage = %Stage::Normalize, "Normalized {} samples", samples.len());

    let standstills = detect_standstills(
        &samples,
        config.standstill_threshold,
        config.standstill_min_duration,
    );
    tracing::info!(
        stage = %Stage::Standstill,
        "Detected {} standstill periods",
        standstills.len()
    );

    let smooth = resample_path(&samples, config.resample_interval)?;
    tracing::info!(
        stage = %Stage::Interpolate,
        "Resampled {} samples into {} points",
        samples.len(),
        smooth.len()
    );

    let keep = keep_indices(&samples, &standstills, &smooth);
    let reduced = reduce_path(&smooth, config.tolerance, &keep);
    tracing::info!(
        stage = %Stage::Reduce,
        "Reduced {} points to {} ({} required)",
        smooth.len(),
        reduced.len(),
        keep.len()
    );

    Ok(PipelineOutput {
        samples,
        standstills,
        smooth,
        keep_indices: keep,
        reduced,
    })
}
