//! Output writers for reduced paths
//!
//! An exporter renders the whole path into memory and writes it out in one
//! pass, overwriting whatever was at the target.

pub mod lua;

pub use lua::LuaTableExporter;

use crate::pipeline::stage::PipelineResult;
use crate::processing::spline::SmoothSample;
use std::path::Path;

/// Serializes a reduced path for a downstream consumer
pub trait TrajectoryExporter {
    /// File extension (without the dot) used when deriving output paths
    fn extension(&self) -> &str;

    /// Render the full output text
    fn render(&self, path: &[SmoothSample]) -> String;

    /// Render and write to `target`, replacing any existing file
    fn write_to_file(&self, path: &[SmoothSample], target: &Path) -> PipelineResult<()> {
        std::fs::write(target, self.render(path))?;
        Ok(())
    }
}
