//! Numerical trajectory processing
//!
//! This module contains the stages that turn a deduplicated sample log into
//! a smooth, compact path: time normalization, standstill detection, cubic
//! spline resampling and tolerance-bounded reduction.

pub mod normalize;
pub mod reduction;
pub mod spline;
pub mod standstill;

pub use normalize::normalize_times;
pub use reduction::{reduce_path, PathReducer};
pub use spline::{resample_path, CubicSpline, PathSpline, SmoothSample};
pub use standstill::{detect_standstills, keep_indices, StandstillInterval};
