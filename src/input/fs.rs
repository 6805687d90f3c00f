use std::{fs, io, path::PathBuf, time::SystemTime};

/// Watches the presentation's file.
///
/// This polls the file's last modification time rather than subscribing to filesystem events.
pub struct PresentationFileWatcher {
    path: PathBuf,
    last_modification: SystemTime,
}

impl PresentationFileWatcher {
    /// Create a watcher over the given file path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let last_modification = fs::metadata(&path).and_then(|m| m.modified()).unwrap_or(SystemTime::UNIX_EPOCH);
        Self { path, last_modification }
    }

    /// Check whether this file has been modified since the last time this was called.
    pub fn has_modifications(&mut self) -> io::Result<bool> {
        let metadata = fs::metadata(&self.path)?;
        let modified_time = metadata.modified()?;
        if modified_time > self.last_modification {
            self.last_modification = modified_time;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[test]
    fn detects_modifications() {
        let file = tempfile::NamedTempFile::new().expect("failed to create file");
        let mut watcher = PresentationFileWatcher::new(file.path());
        assert!(!watcher.has_modifications().expect("metadata failed"));

        let later = SystemTime::now() + Duration::from_secs(10);
        file.as_file().set_modified(later).expect("setting time failed");
        assert!(watcher.has_modifications().expect("metadata failed"));
        assert!(!watcher.has_modifications().expect("metadata failed"));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut watcher = PresentationFileWatcher::new(dir.path().join("slides.md"));
        assert!(watcher.has_modifications().is_err());
    }
}
