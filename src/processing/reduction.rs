//! Ramer-Douglas-Peucker reduction of resampled paths
//!
//! Works on inclusive index ranges into one backing slice, so every index the
//! recursion sees is a global index into the full smooth path. Points whose
//! index is in the keep set are never dropped.

use crate::processing::spline::SmoothSample;
use std::collections::BTreeSet;

/// Tolerance-bounded path simplifier that preserves required points
pub struct PathReducer<'a> {
    points: &'a [SmoothSample],
    epsilon: f64,
    keep: &'a BTreeSet<usize>,
}

impl<'a> PathReducer<'a> {
    pub fn new(points: &'a [SmoothSample], epsilon: f64, keep: &'a BTreeSet<usize>) -> Self {
        Self {
            points,
            epsilon,
            keep,
        }
    }

    /// Indices of the surviving points, ascending
    pub fn surviving_indices(&self) -> Vec<usize> {
        let Some(last) = self.points.len().checked_sub(1) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        self.reduce_range(0, last, &mut out);
        out.push(last);
        out
    }

    /// Surviving points in time order
    pub fn reduce(&self) -> Vec<SmoothSample> {
        self.surviving_indices()
            .into_iter()
            .map(|i| self.points[i])
            .collect()
    }

    /// Push the survivors of `first..=last`, except `last` itself.
    ///
    /// Leaving the shared endpoint to the caller means adjacent sub-ranges
    /// concatenate without emitting their common point twice.
    fn reduce_range(&self, first: usize, last: usize, out: &mut Vec<usize>) {
        if last - first + 1 < 3 {
            out.extend(first..last);
            return;
        }

        let (max_distance, split) = self.farthest_point(first, last);

        if max_distance > self.epsilon {
            self.reduce_range(first, split, out);
            self.reduce_range(split, last, out);
        } else if self.keep.range(first + 1..last).next().is_some() {
            out.extend(first..last);
        } else {
            out.push(first);
        }
    }

    /// Largest perpendicular distance from the chord `first -> last`, and
    /// the index where it occurs (the earliest one on ties)
    fn farthest_point(&self, first: usize, last: usize) -> (f64, usize) {
        let start = self.points[first].position();
        let end = self.points[last].position();
        let chord = sub(end, start);
        let length = norm(chord);

        let mut max_distance = 0.0;
        let mut split = first + 1;

        if length == 0.0 {
            return (max_distance, split);
        }

        let unit = [chord[0] / length, chord[1] / length, chord[2] / length];
        for i in first + 1..last {
            let offset = sub(self.points[i].position(), start);
            let distance = norm(cross(offset, unit));
            if distance > max_distance {
                max_distance = distance;
                split = i;
            }
        }

        (max_distance, split)
    }
}

/// Simplify a smooth path with Ramer-Douglas-Peucker
///
/// # Arguments
/// * `smooth` - Resampled path to simplify
/// * `epsilon` - Maximum perpendicular distance from a chord that may be dropped
/// * `keep` - Indices into `smooth` that must survive
///
/// # Returns
/// An order-preserving subsequence of `smooth` that always contains its first
/// and last point and every point listed in `keep`
pub fn reduce_path(
    smooth: &[SmoothSample],
    epsilon: f64,
    keep: &BTreeSet<usize>,
) -> Vec<SmoothSample> {
    PathReducer::new(smooth, epsilon, keep).reduce()
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64, x: f64, y: f64, z: f64) -> SmoothSample {
        SmoothSample { t, x, y, z }
    }

    fn line(n: usize) -> Vec<SmoothSample> {
        (0..n).map(|i| point(i as f64 * 0.05, i as f64, 0.0, 0.0)).collect()
    }

    fn is_subsequence(reduced: &[SmoothSample], smooth: &[SmoothSample]) -> bool {
        let mut it = smooth.iter();
        reduced.iter().all(|r| it.any(|s| s == r))
    }

    #[test]
    fn test_short_inputs_unchanged() {
        let keep = BTreeSet::new();
        assert!(reduce_path(&[], 0.5, &keep).is_empty());

        let one = line(1);
        assert_eq!(reduce_path(&one, 0.5, &keep), one);

        let two = line(2);
        assert_eq!(reduce_path(&two, 0.5, &keep), two);
    }

    #[test]
    fn test_straight_line_collapses_to_endpoints() {
        let smooth = line(10);
        let reduced = reduce_path(&smooth, 0.5, &BTreeSet::new());
        assert_eq!(reduced, vec![smooth[0], smooth[9]]);
    }

    #[test]
    fn test_corner_is_kept() {
        let mut smooth = line(5);
        smooth.extend((1..5).map(|i| point((4 + i) as f64 * 0.05, 4.0, i as f64, 0.0)));
        let reduced = reduce_path(&smooth, 0.5, &BTreeSet::new());
        assert_eq!(reduced, vec![smooth[0], smooth[4], smooth[8]]);
    }

    #[test]
    fn test_small_deviation_within_tolerance() {
        let mut smooth = line(7);
        smooth[3].y = 0.4;
        let reduced = reduce_path(&smooth, 0.5, &BTreeSet::new());
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn test_keep_point_retains_whole_segment() {
        let smooth = line(6);
        let keep: BTreeSet<usize> = [3].into_iter().collect();
        let reduced = reduce_path(&smooth, 0.5, &keep);
        assert_eq!(reduced, smooth);
    }

    #[test]
    fn test_keep_endpoint_does_not_block_collapse() {
        let smooth = line(6);
        let keep: BTreeSet<usize> = [0, 5].into_iter().collect();
        let reduced = reduce_path(&smooth, 0.5, &keep);
        assert_eq!(reduced, vec![smooth[0], smooth[5]]);
    }

    #[test]
    fn test_keep_index_uses_global_offset() {
        // Corner at 4 splits the path; index 6 lives in the right half and
        // must be matched against the global index, not the local one.
        let mut smooth = line(5);
        smooth.extend((1..5).map(|i| point((4 + i) as f64 * 0.05, 4.0, i as f64, 0.0)));
        let keep: BTreeSet<usize> = [6].into_iter().collect();

        let reduced = PathReducer::new(&smooth, 0.5, &keep).surviving_indices();
        assert_eq!(reduced, vec![0, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_degenerate_chord_collapses() {
        let smooth = vec![
            point(0.0, 0.0, 0.0, 0.0),
            point(0.05, 3.0, 0.0, 0.0),
            point(0.1, 5.0, 1.0, 0.0),
            point(0.15, 0.0, 0.0, 0.0),
        ];
        let reduced = reduce_path(&smooth, 0.5, &BTreeSet::new());
        assert_eq!(reduced, vec![smooth[0], smooth[3]]);
    }

    #[test]
    fn test_degenerate_chord_with_keep_point() {
        let smooth = vec![
            point(0.0, 0.0, 0.0, 0.0),
            point(0.05, 3.0, 0.0, 0.0),
            point(0.1, 5.0, 1.0, 0.0),
            point(0.15, 0.0, 0.0, 0.0),
        ];
        let keep: BTreeSet<usize> = [2].into_iter().collect();
        let reduced = reduce_path(&smooth, 0.5, &keep);
        assert_eq!(reduced, smooth);
    }

    #[test]
    fn test_extremes_and_subsequence_preserved() {
        let smooth: Vec<SmoothSample> = (0..200)
            .map(|i| {
                let t = i as f64 * 0.05;
                point(t, (t * 1.7).sin() * 4.0, (t * 0.6).cos() * 2.0, t * 0.3)
            })
            .collect();
        let keep: BTreeSet<usize> = [17, 80, 81, 150].into_iter().collect();
        let reduced = reduce_path(&smooth, 0.5, &keep);

        assert_eq!(reduced.first(), smooth.first());
        assert_eq!(reduced.last(), smooth.last());
        assert!(is_subsequence(&reduced, &smooth));
        assert!(reduced.windows(2).all(|w| w[0].t < w[1].t));
        for &i in &keep {
            assert!(reduced.contains(&smooth[i]), "keep index {} was dropped", i);
        }
        assert!(reduced.len() < smooth.len());
    }
}
