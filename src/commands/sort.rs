//! Record sort/dedupe pre-pass
//!
//! Rewrites a line-delimited log so identifiers are unique (last occurrence
//! wins) and ascending.

use crate::capture::dedupe_records;
use crate::pipeline::PipelineResult;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Sort and dedupe `path` in place. Returns the number of records written.
///
/// The new contents go to a temporary file in the same directory which then
/// replaces the original, so a failed run leaves the input untouched.
pub fn sort_records_file(path: &Path) -> PipelineResult<usize> {
    let records = dedupe_records(BufReader::new(File::open(path)?))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for record in &records {
            serde_json::to_writer(&mut writer, record).map_err(std::io::Error::from)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::info!("Wrote {} sorted records to {}", records.len(), path.display());

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineError;

    #[test]
    fn test_sorts_and_dedupes_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(
            &path,
            concat!(
                "{\"IGT\":3,\"STATE\":{\"X\":3}}\n",
                "{\"IGT\":1,\"STATE\":{\"X\":1}}\n",
                "{\"IGT\":3,\"STATE\":{\"X\":30}}\n",
            ),
        )
        .unwrap();

        assert_eq!(sort_records_file(&path).unwrap(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"IGT\":1,\"STATE\":{\"X\":1}}\n{\"IGT\":3,\"STATE\":{\"X\":30}}\n"
        );
    }

    #[test]
    fn test_failure_leaves_input_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        let original = "{\"IGT\":2}\nnot json\n";
        std::fs::write(&path, original).unwrap();

        let err = sort_records_file(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { line: 2, .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
