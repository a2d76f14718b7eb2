use crate::export::TrajectoryExporter;
use crate::processing::spline::SmoothSample;
use std::fmt::Write;

/// Writes paths as a Lua table literal assigned to `path`
///
/// ```text
/// path = {
///   {time = 0.0, x = 1.5, y = 2.0, z = -0.25},
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LuaTableExporter;

impl TrajectoryExporter for LuaTableExporter {
    fn extension(&self) -> &str {
        "lua"
    }

    fn render(&self, path: &[SmoothSample]) -> String {
        let mut out = String::from("path = {\n");
        for point in path {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "  {{time = {}, x = {}, y = {}, z = {}}},",
                format_number(point.t),
                format_number(point.x),
                format_number(point.y),
                format_number(point.z)
            );
        }
        out.push_str("}\n");
        out
    }
}

/// Shortest round-trip form, always with a fractional part (`1.0`, `0.05`)
fn format_number(value: f64) -> String {
    format!("{:?}", value)
}
