//! File-level commands
//!
//! These are the operations the binaries expose: processing a position log
//! into a playback path, and the sort/dedupe pre-pass.

pub mod process;
pub mod sort;

pub use process::{derive_output_path, process_trajectory, process_trajectory_with, ProcessSummary};
pub use sort::sort_records_file;
