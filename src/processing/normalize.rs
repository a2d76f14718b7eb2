//! Time normalization
//!
//! Shifts every timestamp so the path starts at zero.

use crate::capture::types::Sample;

/// Subtract the first sample's timestamp from every sample
pub fn normalize_times(mut path: Vec<Sample>) -> Vec<Sample> {
    let Some(start) = path.first().map(|s| s.id) else {
        return path;
    };

    for sample in &mut path {
        sample.id -= start;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_starts_at_zero() {
        let path = vec![
            Sample::new(100.0, 1.0, 2.0, 3.0),
            Sample::new(100.5, 1.0, 2.0, 3.0),
            Sample::new(102.0, 4.0, 5.0, 6.0),
        ];
        let normalized = normalize_times(path);
        let times: Vec<f64> = normalized.iter().map(|s| s.id).collect();
        assert_eq!(times, vec![0.0, 0.5, 2.0]);
        assert_eq!(normalized[2].x, 4.0);
    }

    #[test]
    fn test_empty_path() {
        assert!(normalize_times(Vec::new()).is_empty());
    }
}
