//! Position log input
//!
//! Reads line-delimited JSON records, collapses duplicate identifiers
//! (last occurrence wins) and yields samples in ascending identifier order.

pub mod loader;
pub mod types;

pub use loader::{dedupe_records, load_samples, parse_samples};
pub use types::{PositionState, RawRecord, Sample};
