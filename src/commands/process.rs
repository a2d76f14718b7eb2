//! Trajectory processing command
//!
//! Loads a position log, runs the pipeline and writes the reduced path.

use crate::capture::load_samples;
use crate::config::TrajectoryConfig;
use crate::export::{LuaTableExporter, TrajectoryExporter};
use crate::pipeline::{run_pipeline, PipelineResult, Stage};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Counts reported after a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub sample_count: usize,
    pub standstill_count: usize,
    pub smooth_count: usize,
    pub reduced_count: usize,
    pub output_path: PathBuf,
}

/// Output path next to the input, with the exporter's extension
pub fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension(LuaTableExporter.extension())
}

/// Process one log file end to end
pub fn process_trajectory(
    input: &Path,
    output: &Path,
    config: &TrajectoryConfig,
) -> PipelineResult<ProcessSummary> {
    process_trajectory_with(input, output, config, &LuaTableExporter)
}

/// Process one log file end to end with a specific exporter
pub fn process_trajectory_with(
    input: &Path,
    output: &Path,
    config: &TrajectoryConfig,
    exporter: &dyn TrajectoryExporter,
) -> PipelineResult<ProcessSummary> {
    tracing::info!(
        "Processing trajectory {} -> {} (interval={}, tolerance={}, standstill={}/{})",
        input.display(),
        output.display(),
        config.resample_interval,
        config.tolerance,
        config.standstill_threshold,
        config.standstill_min_duration
    );

    let samples = load_samples(input)?;
    tracing::info!(stage = %Stage::Load, "Loaded {} unique samples", samples.len());

    let result = run_pipeline(samples, config)?;

    exporter.write_to_file(&result.reduced, output)?;
    tracing::info!(
        stage = %Stage::Export,
        "Exported smooth path to {}",
        output.display()
    );

    Ok(ProcessSummary {
        sample_count: result.samples.len(),
        standstill_count: result.standstills.len(),
        smooth_count: result.smooth.len(),
        reduced_count: result.reduced.len(),
        output_path: output.to_path_buf(),
    })
}
