//! Mtime-based freshness for generated PNGs.
//!
//! Both sides are local files touched only by the user (SVG) or by us (PNG),
//! so timestamps are a reliable signal.

use std::path::Path;
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Modification time, or the epoch when the file is missing.
///
/// A missing target is therefore older than any real source.
pub fn mtime_or_epoch(path: &Path) -> SystemTime {
    get_mtime(path).unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Check if `source` is strictly newer than `target`.
///
/// A missing target counts as the epoch; a missing source is never newer.
pub fn source_is_newer(source: &Path, target: &Path) -> bool {
    let Some(source_time) = get_mtime(source) else {
        return false;
    };
    source_time > mtime_or_epoch(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path, secs: u64) {
        fs::write(path, b"x").unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_missing_target_is_epoch() {
        let dir = TempDir::new().unwrap();
        assert_eq!(mtime_or_epoch(&dir.path().join("nope.png")), SystemTime::UNIX_EPOCH);
    }

    #[test]
    fn test_source_newer_than_missing_target() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.svg");
        touch(&source, 1_000);
        assert!(source_is_newer(&source, &dir.path().join("a.png")));
    }

    #[test]
    fn test_equal_mtime_is_not_newer() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.svg");
        let target = dir.path().join("a.png");
        touch(&source, 1_000);
        touch(&target, 1_000);
        assert!(!source_is_newer(&source, &target));
    }

    #[test]
    fn test_source_newer_and_older() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.svg");
        let target = dir.path().join("a.png");

        touch(&source, 2_000);
        touch(&target, 1_000);
        assert!(source_is_newer(&source, &target));

        touch(&target, 3_000);
        assert!(!source_is_newer(&source, &target));
    }

    #[test]
    fn test_missing_source_is_never_newer() {
        let dir = TempDir::new().unwrap();
        assert!(!source_is_newer(&dir.path().join("a.svg"), &dir.path().join("a.png")));
    }
}
