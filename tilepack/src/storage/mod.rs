//! Local tile storage probing.
//!
//! The catalog core never touches the filesystem directly when deciding
//! what is already downloaded; it asks a [`StorageProbe`].
//! [`DirectoryProbe`] is the standard implementation over a flat
//! catalog directory.

use std::path::{Path, PathBuf};

/// Queries about locally present tile files.
pub trait StorageProbe {
    /// Whether the tile's file is present locally.
    ///
    /// This is an existence test only; the local size is not compared
    /// against the manifest, so a truncated or stale file still counts
    /// as present.
    fn exists(&self, tile_id: &str) -> bool;

    /// Size of the local tile file, if present.
    fn file_size(&self, tile_id: &str) -> Option<u64>;
}

/// Probe over a flat directory of downloaded tile files.
#[derive(Debug, Clone)]
pub struct DirectoryProbe {
    root: PathBuf,
}

impl DirectoryProbe {
    /// Create a probe rooted at the catalog directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The catalog directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, tile_id: &str) -> PathBuf {
        self.root.join(tile_id)
    }
}

impl StorageProbe for DirectoryProbe {
    fn exists(&self, tile_id: &str) -> bool {
        self.path_for(tile_id).is_file()
    }

    fn file_size(&self, tile_id: &str) -> Option<u64> {
        let metadata = std::fs::metadata(self.path_for(tile_id)).ok()?;
        if metadata.is_file() {
            Some(metadata.len())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_for_present_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("00123.tile"), b"data").unwrap();

        let probe = DirectoryProbe::new(temp.path());
        assert!(probe.exists("00123.tile"));
        assert!(!probe.exists("77777.tile"));
    }

    #[test]
    fn test_directory_is_not_a_tile() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();

        let probe = DirectoryProbe::new(temp.path());
        assert!(!probe.exists("nested"));
        assert!(probe.file_size("nested").is_none());
    }

    #[test]
    fn test_file_size() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("World.tile"), vec![0u8; 123]).unwrap();

        let probe = DirectoryProbe::new(temp.path());
        assert_eq!(probe.file_size("World.tile"), Some(123));
        assert_eq!(probe.file_size("missing"), None);
    }

    #[test]
    fn test_exists_ignores_truncation() {
        // A half-downloaded tile still reports as present
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("0001.tile"), b"x").unwrap();

        let probe = DirectoryProbe::new(temp.path());
        assert!(probe.exists("0001.tile"));
        assert_eq!(probe.file_size("0001.tile"), Some(1));
    }
}
