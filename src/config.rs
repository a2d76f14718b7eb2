//! Tunable parameters for a pipeline run
//!
//! These are not exposed on the command line. Callers that need different
//! values construct a [`TrajectoryConfig`] themselves (or deserialize one).

use crate::pipeline::stage::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

/// Input file used when no path is given on the command line
pub const DEFAULT_INPUT_PATH: &str = "spline/welcome_center_plain.json";

/// Output file used when no path is given on the command line
pub const DEFAULT_OUTPUT_PATH: &str = "spline/welcome_center_plain.lua";

/// Time step between resampled points
pub const DEFAULT_RESAMPLE_INTERVAL: f64 = 0.05;

/// Maximum chord deviation tolerated by path reduction
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Maximum distance from the anchor sample that still counts as standing still
pub const DEFAULT_STANDSTILL_THRESHOLD: f64 = 0.1;

/// Minimum duration of a standstill interval
pub const DEFAULT_STANDSTILL_MIN_DURATION: f64 = 0.5;

/// Parameters shared by every stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrajectoryConfig {
    /// Time step used when resampling the spline
    pub resample_interval: f64,
    /// Path reduction tolerance (same units as the positions)
    pub tolerance: f64,
    /// Standstill radius around the anchor sample
    pub standstill_threshold: f64,
    /// Minimum standstill duration (same units as the timestamps)
    pub standstill_min_duration: f64,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            resample_interval: DEFAULT_RESAMPLE_INTERVAL,
            tolerance: DEFAULT_TOLERANCE,
            standstill_threshold: DEFAULT_STANDSTILL_THRESHOLD,
            standstill_min_duration: DEFAULT_STANDSTILL_MIN_DURATION,
        }
    }
}

impl TrajectoryConfig {
    /// Check every value is usable. Returns the first offending field.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.resample_interval.is_finite() || self.resample_interval <= 0.0 {
            return Err(PipelineError::Config(format!(
                "resample_interval must be a positive number, got {}",
                self.resample_interval
            )));
        }

        let non_negative = [
            ("tolerance", self.tolerance),
            ("standstill_threshold", self.standstill_threshold),
            ("standstill_min_duration", self.standstill_min_duration),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PipelineError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
