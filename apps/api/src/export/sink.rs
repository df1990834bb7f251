//! File-emission sinks for finished exports.

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::errors::ExportError;

/// Destination for a finished artifact.
///
/// An implementation either stores the complete file or fails; it never leaves
/// a partial file at `filename`.
pub trait ExportSink {
    fn emit(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory through a temp file that is renamed into place.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

impl ExportSink for DirectorySink {
    fn emit(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let sink_error = |source: std::io::Error| ExportError::Sink {
            filename: filename.to_string(),
            source,
        };

        let target = self.dir.join(filename);
        let mut temp = tempfile::NamedTempFile::new_in(&self.dir).map_err(sink_error)?;
        temp.write_all(bytes).map_err(sink_error)?;
        temp.as_file().sync_all().map_err(sink_error)?;
        temp.persist(&target).map_err(|e| sink_error(e.error))?;

        info!(path = %target.display(), bytes = bytes.len(), "Export written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_file_with_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let path = sink.emit("trip_diary.pdf", b"%PDF-1.7 test").unwrap();
        assert_eq!(path, dir.path().join("trip_diary.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 test");
    }

    #[test]
    fn test_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.emit("a_diary.pdf", b"old").unwrap();
        sink.emit("a_diary.pdf", b"new").unwrap();
        assert_eq!(std::fs::read(dir.path().join("a_diary.pdf")).unwrap(), b"new");
    }

    #[test]
    fn test_missing_directory_fails_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut sink = DirectorySink::new(&missing);
        let err = sink.emit("a_diary.pdf", b"data").unwrap_err();
        assert!(matches!(err, ExportError::Sink { .. }));
        assert!(!missing.join("a_diary.pdf").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
