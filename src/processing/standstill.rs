//! Standstill detection
//!
//! Finds maximal runs of samples that stay within a small radius of the
//! run's first sample for at least a minimum duration.

use crate::capture::types::Sample;
use crate::processing::spline::SmoothSample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive range of sample indices during which the position barely moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandstillInterval {
    pub start: usize,
    pub end: usize,
}

impl StandstillInterval {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Scan a normalized path for standstill intervals
///
/// Distances are always measured against the interval's anchor sample,
/// never against the previous sample.
///
/// # Arguments
/// * `path` - Normalized samples in time order
/// * `threshold` - Maximum distance from the anchor sample (e.g., 0.1)
/// * `min_duration` - Minimum time between first and last sample (e.g., 0.5)
///
/// # Returns
/// Inclusive index intervals into `path`, in time order and never overlapping
pub fn detect_standstills(
    path: &[Sample],
    threshold: f64,
    min_duration: f64,
) -> Vec<StandstillInterval> {
    let mut intervals = Vec::new();
    let n = path.len();
    let mut i = 0;

    while i < n {
        let anchor = &path[i];
        let mut j = i + 1;
        while j < n && anchor.distance_to(&path[j]) <= threshold {
            j += 1;
        }

        if j - i >= 2 && path[j - 1].id - anchor.id >= min_duration {
            intervals.push(StandstillInterval::new(i, j - 1));
            i = j;
        } else {
            i += 1;
        }
    }

    intervals
}

/// Map standstill boundaries onto indices of the resampled path
///
/// Both boundary samples of every interval are located by timestamp: each
/// picks the smooth sample with the nearest `t` (the earlier one on a tie).
/// Boundaries past the end of the smooth path clamp to its last index.
pub fn keep_indices(
    path: &[Sample],
    intervals: &[StandstillInterval],
    smooth: &[SmoothSample],
) -> BTreeSet<usize> {
    if smooth.is_empty() {
        return BTreeSet::new();
    }

    intervals
        .iter()
        .flat_map(|interval| [interval.start, interval.end])
        .filter_map(|index| path.get(index))
        .map(|sample| nearest_index(smooth, sample.id))
        .collect()
}

fn nearest_index(smooth: &[SmoothSample], t: f64) -> usize {
    let after = smooth.partition_point(|s| s.t < t);
    if after == 0 {
        return 0;
    }
    if after == smooth.len() {
        return smooth.len() - 1;
    }

    let before = after - 1;
    if t - smooth[before].t <= smooth[after].t - t {
        before
    } else {
        after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t: f64, x: f64) -> Sample {
        Sample::new(t, x, 0.0, 0.0)
    }

    fn smooth_at(t: f64) -> SmoothSample {
        SmoothSample { t, x: 0.0, y: 0.0, z: 0.0 }
    }

    #[test]
    fn test_single_standstill_before_move() {
        let path = vec![at(0.0, 0.0), at(1.0, 0.0), at(2.0, 0.0), at(3.0, 10.0)];
        let intervals = detect_standstills(&path, 0.1, 0.5);
        assert_eq!(intervals, vec![StandstillInterval::new(0, 2)]);
    }

    #[test]
    fn test_distance_measured_from_anchor() {
        // Each step is within the threshold of its predecessor but drifts away
        // from the anchor.
        let path = vec![at(0.0, 0.0), at(1.0, 0.08), at(2.0, 0.16), at(3.0, 0.24)];
        let intervals = detect_standstills(&path, 0.1, 0.5);
        assert_eq!(
            intervals,
            vec![StandstillInterval::new(0, 1), StandstillInterval::new(2, 3)]
        );
    }

    #[test]
    fn test_too_short_is_ignored() {
        let path = vec![at(0.0, 0.0), at(0.2, 0.0), at(0.4, 5.0), at(0.6, 10.0)];
        assert!(detect_standstills(&path, 0.1, 0.5).is_empty());
    }

    #[test]
    fn test_single_sample_has_no_standstill() {
        assert!(detect_standstills(&[at(0.0, 0.0)], 0.1, 0.0).is_empty());
    }

    #[test]
    fn test_intervals_do_not_overlap() {
        let path: Vec<Sample> = (0..20)
            .map(|i| at(i as f64 * 0.25, if (i / 5) % 2 == 0 { 0.0 } else { 3.0 }))
            .collect();
        let intervals = detect_standstills(&path, 0.1, 0.5);
        assert_eq!(intervals.len(), 4);
        assert!(intervals.windows(2).all(|w| w[0].end < w[1].start));
    }

    #[test]
    fn test_keep_indices_map_by_timestamp() {
        let path = vec![at(0.0, 0.0), at(0.52, 0.0), at(1.0, 0.0), at(1.5, 4.0)];
        let intervals = vec![StandstillInterval::new(0, 2)];
        let smooth: Vec<SmoothSample> = (0..30).map(|i| smooth_at(i as f64 * 0.05)).collect();

        let keep = keep_indices(&path, &intervals, &smooth);
        assert_eq!(keep.into_iter().collect::<Vec<_>>(), vec![0, 20]);
    }

    #[test]
    fn test_keep_indices_nearest_and_clamped() {
        let smooth = vec![smooth_at(0.0), smooth_at(0.1), smooth_at(0.2)];
        assert_eq!(nearest_index(&smooth, 0.04), 0);
        assert_eq!(nearest_index(&smooth, 0.05), 0);
        assert_eq!(nearest_index(&smooth, 0.06), 1);
        assert_eq!(nearest_index(&smooth, 5.0), 2);
    }
}
