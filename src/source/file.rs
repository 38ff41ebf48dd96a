//! File-based status source.
//!
//! Polls a JSON status file for the monitored subject. Handy for demos
//! and debugging without a live endpoint: edit the file to flip the
//! posture.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{SourceError, StatusPayload, StatusReport, StatusSource};

/// A status source that reads reports from a JSON file.
///
/// The source tracks the file's modification time and only reports when
/// the file has been updated, so a static file yields exactly one report.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<StatusReport> {
        let result: Result<StatusReport, SourceError> = fs::read_to_string(&self.path)
            .map_err(SourceError::from)
            .and_then(|content| {
                let payload: StatusPayload = serde_json::from_str(&content)?;
                Ok(payload.into())
            });

        match result {
            Ok(report) => {
                self.last_error = None;
                Some(report)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

impl StatusSource for FileSource {
    fn poll(&mut self) -> Option<StatusReport> {
        let current_modified = self.get_modified_time();

        // Only re-read when the file has been touched since the last read.
        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, don't update
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(report) = self.read_file() {
                self.last_modified = current_modified;
                return Some(report);
            }
        }

        None
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/status.json");
        assert_eq!(source.path(), Path::new("/tmp/status.json"));
        assert_eq!(source.description(), "file: /tmp/status.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_reports_once_per_change() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"status": "SECURE"}}"#).unwrap();

        let mut source = FileSource::new(file.path());

        let report = source.poll().unwrap();
        assert_eq!(report.status, "SECURE");

        // Unchanged file, no new report.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"status": "SECURE"}}"#).unwrap();

        let mut source = FileSource::new(file.path());
        let _ = source.poll();

        // Rewrite the file (wait a bit so mtime actually moves).
        std::thread::sleep(std::time::Duration::from_millis(10));
        let mut replacement = std::fs::File::create(file.path()).unwrap();
        write!(replacement, r#"{{"status": "LOCKED"}}"#).unwrap();
        replacement.flush().unwrap();

        // Note: may not fire on filesystems with coarse mtime resolution.
        if let Some(report) = source.poll() {
            assert_eq!(report.status, "LOCKED");
        }
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/status.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("read failed"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().contains("unreadable status payload"));
    }
}
