//! Trajectory Spline - smooth, compact playback paths from raw position logs.
//!
//! This is the library crate behind the `trajectory-spline` and
//! `sort-records` binaries. It loads timestamped 3D position records,
//! detects standstills, fits per-axis cubic splines, reduces the resampled
//! path and writes it out as a Lua table.

pub mod capture;
pub mod commands;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod processing;

use commands::{derive_output_path, process_trajectory, ProcessSummary};
use config::{TrajectoryConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "trajectory_spline=debug,trajectory_spline_lib=debug,sort_records=debug"
    } else {
        "trajectory_spline=info,trajectory_spline_lib=info,sort_records=info"
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Process `input` (or the default log) with the default configuration
///
/// When an input is given the output sits next to it with a `.lua`
/// extension; otherwise the fixed default paths are used.
pub fn run(input: Option<PathBuf>) -> anyhow::Result<ProcessSummary> {
    use anyhow::Context;

    tracing::info!("Starting Trajectory Spline v{}", env!("CARGO_PKG_VERSION"));

    let (input, output) = match input {
        Some(input) => {
            let output = derive_output_path(&input);
            (input, output)
        }
        None => (
            PathBuf::from(DEFAULT_INPUT_PATH),
            PathBuf::from(DEFAULT_OUTPUT_PATH),
        ),
    };

    let summary = process_trajectory(&input, &output, &TrajectoryConfig::default())
        .with_context(|| format!("failed to process {}", input.display()))?;

    Ok(summary)
}
