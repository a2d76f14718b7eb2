use crate::capture::types::{RawRecord, Sample};
use crate::pipeline::stage::{PipelineError, PipelineResult};
use ordered_float::OrderedFloat;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Name of the identifier field shared by every record
pub const ID_FIELD: &str = "IGT";

/// Load a position log from disk
pub fn load_samples(path: &Path) -> PipelineResult<Vec<Sample>> {
    let file = File::open(path)?;
    let samples = parse_samples(BufReader::new(file))?;

    tracing::debug!("Loaded {} unique samples from {}", samples.len(), path.display());

    Ok(samples)
}

/// Parse line-delimited records into unique samples ordered by identifier
///
/// A later record with an identifier already seen replaces the earlier one.
/// Blank lines are skipped; any other malformed line aborts the load.
pub fn parse_samples<R: BufRead>(reader: R) -> PipelineResult<Vec<Sample>> {
    let mut by_id: BTreeMap<OrderedFloat<f64>, Sample> = BTreeMap::new();
    let mut line_count = 0;

    for line in record_lines(reader) {
        let (number, line) = line?;
        line_count += 1;

        let record: RawRecord = serde_json::from_str(&line)
            .map_err(|e| PipelineError::parse(number, e.to_string()))?;
        by_id.insert(OrderedFloat(record.igt), record.into());
    }

    if by_id.is_empty() {
        return Err(PipelineError::parse(0, "no records"));
    }

    tracing::debug!(
        "Collapsed {} records into {} unique identifiers",
        line_count,
        by_id.len()
    );

    Ok(by_id.into_values().collect())
}

/// Dedupe and order arbitrary records by their identifier, keeping every field
///
/// Only the identifier is required to be present and numeric; the rest of
/// each record is passed through untouched.
pub fn dedupe_records<R: BufRead>(reader: R) -> PipelineResult<Vec<Value>> {
    let mut by_id: BTreeMap<OrderedFloat<f64>, Value> = BTreeMap::new();

    for line in record_lines(reader) {
        let (number, line) = line?;

        let record: Value = serde_json::from_str(&line)
            .map_err(|e| PipelineError::parse(number, e.to_string()))?;
        let id = record
            .get(ID_FIELD)
            .ok_or_else(|| PipelineError::parse(number, format!("missing field `{}`", ID_FIELD)))?
            .as_f64()
            .ok_or_else(|| {
                PipelineError::parse(number, format!("field `{}` is not a number", ID_FIELD))
            })?;
        by_id.insert(OrderedFloat(id), record);
    }

    Ok(by_id.into_values().collect())
}

/// Non-blank lines paired with their 1-based line number
///
/// Read failures stay IO errors. A line that is not valid UTF-8 is a
/// malformed record and becomes a parse error for that line.
fn record_lines<R: BufRead>(reader: R) -> impl Iterator<Item = PipelineResult<(usize, String)>> {
    reader
        .split(b'\n')
        .enumerate()
        .filter_map(|(index, bytes)| {
            let number = index + 1;
            let mut bytes = match bytes {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(PipelineError::Io(e))),
            };
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }

            match String::from_utf8(bytes) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(Ok((number, line))),
                Err(e) => Some(Err(PipelineError::parse(number, e.to_string()))),
            }
        })
}
