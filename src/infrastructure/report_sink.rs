// Report sink - Saves downloaded report payloads into the download directory
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` to `<dir>/<file_name>`, replacing any previous file only
    /// once the new payload is fully on disk.
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(file_name);
        let tmp = self.dir.join(format!(".{}.part", file_name));
        if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileReportSink::new(dir.path().join("reports"));

        let first = sink.save("report.pdf", b"old").unwrap();
        let second = sink.save("report.pdf", b"new").unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"new");
        assert!(!dir.path().join("reports").join(".report.pdf.part").exists());
    }

    #[test]
    fn test_failed_save_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir_all(dir.path().join("report.pdf").join("keep")).unwrap();
        let sink = FileReportSink::new(dir.path());

        sink.save("report.pdf", b"new").unwrap_err();

        assert!(!dir.path().join(".report.pdf.part").exists());
        assert!(dir.path().join("report.pdf").is_dir());
    }
}
