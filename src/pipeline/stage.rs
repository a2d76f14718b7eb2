//! Pipeline stages and the errors they can raise
//!
//! Every stage runs to completion before the next one starts. Any error
//! aborts the whole run; nothing is retried and no partial output is kept.

use thiserror::Error;

/// Errors that can occur while processing a trajectory
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// The strictly ordered stages of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Read, dedupe and order the raw records
    Load,
    /// Shift timestamps so the path starts at zero
    Normalize,
    /// Find intervals where the position barely moves
    Standstill,
    /// Fit per-axis cubic splines and resample
    Interpolate,
    /// Simplify the resampled path
    Reduce,
    /// Write the reduced path out
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::Normalize => write!(f, "normalize"),
            Stage::Standstill => write!(f, "standstill"),
            Stage::Interpolate => write!(f, "interpolate"),
            Stage::Reduce => write!(f, "reduce"),
            Stage::Export => write!(f, "export"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_matches_pipeline() {
        let stages = [
            Stage::Load,
            Stage::Normalize,
            Stage::Standstill,
            Stage::Interpolate,
            Stage::Reduce,
            Stage::Export,
        ];
        assert!(stages.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Stage::Interpolate.to_string(), "interpolate");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = PipelineError::parse(7, "missing field `X`");
        assert_eq!(err.to_string(), "Parse error on line 7: missing field `X`");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }
}
