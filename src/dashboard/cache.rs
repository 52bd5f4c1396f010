//! Parse results cached by log path and modification time

use crate::input::{LogScanner, ScanError};
use crate::models::Event;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Identity of one version of a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl CacheKey {
    pub fn for_path(path: &Path) -> Result<Self, ScanError> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
            _ => ScanError::Io(e),
        })?;

        Ok(CacheKey {
            path: path.to_path_buf(),
            // not every platform reports mtime
            modified: metadata.modified().ok(),
        })
    }
}

/// Holds the events of the most recently parsed log.
///
/// A request for the same path with an unchanged modification time reuses
/// the stored events; any other key triggers a fresh scan that replaces them.
pub struct ParseCache {
    scanner: LogScanner,
    entry: Mutex<Option<(CacheKey, Arc<Vec<Event>>)>>,
}

impl ParseCache {
    pub fn new() -> Result<Self, ScanError> {
        Ok(ParseCache {
            scanner: LogScanner::new()?,
            entry: Mutex::new(None),
        })
    }

    /// Events for `path`, scanning the file only when the key changed
    pub fn events(&self, path: &Path) -> Result<Arc<Vec<Event>>, ScanError> {
        let key = CacheKey::for_path(path)?;
        let mut entry = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some((cached_key, events)) = entry.as_ref() {
            if *cached_key == key {
                log::debug!("Parse cache hit for {:?}", path);
                return Ok(Arc::clone(events));
            }
        }

        log::info!("Parsing {:?}", path);
        let events = Arc::new(self.scanner.scan_events(path)?);
        *entry = Some((key, Arc::clone(&events)));
        Ok(events)
    }

    /// Drop the cached events
    pub fn invalidate(&self) {
        let mut entry = self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    fn write_log(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_unchanged_file_is_not_rescanned() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "cowrie.log", "CMD: id\n");
        let cache = ParseCache::new().unwrap();

        let first = cache.events(&path).unwrap();
        let second = cache.events(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_modified_file_is_rescanned() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "cowrie.log", "CMD: id\n");
        let cache = ParseCache::new().unwrap();
        let first = cache.events(&path).unwrap();
        assert_eq!(first.len(), 1);

        std::fs::write(&path, "CMD: id\nCMD: whoami\n").unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.events(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_path_change_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_log(dir.path(), "a.log", "CMD: id\n");
        let b = write_log(dir.path(), "b.log", "New connection: 192.0.2.4:2222 (x)\n");
        let cache = ParseCache::new().unwrap();

        let from_a = cache.events(&a).unwrap();
        let from_b = cache.events(&b).unwrap();
        assert!(!Arc::ptr_eq(&from_a, &from_b));
        assert_eq!(from_b[0].src_ip, "192.0.2.4");
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_log(dir.path(), "cowrie.log", "CMD: id\n");
        let cache = ParseCache::new().unwrap();

        let first = cache.events(&path).unwrap();
        cache.invalidate();
        let second = cache.events(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ParseCache::new().unwrap();
        let err = cache.events(&dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }
}
