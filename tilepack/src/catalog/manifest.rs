//! Binary tile manifest.
//!
//! On-disk format (bincode 1.x default options: little-endian,
//! fixed-width integers, maps prefixed with a `u64` entry count),
//! fields in declaration order:
//!
//! - `version: u32`: current UTC date as `(year-2000)*10000 + month*100 + day`
//! - `level: i32`: quadtree level of every cell-addressed tile
//! - `data_files: map<u64, u64>`: cell bit path to remote size
//! - `common_files: map<String, u64>`: plain filename to remote size
//!
//! The version is informational only and never gates loading.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Tile, TileIndex};
use crate::cell::CellId;

/// Errors reading or writing the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The byte stream does not decode as a manifest (truncation,
    /// structural mismatch).
    #[error("Manifest is corrupt: {0}")]
    Corrupt(String),

    /// Underlying read/write fault.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct ManifestRecord {
    version: u32,
    level: i32,
    data_files: BTreeMap<u64, u64>,
    common_files: BTreeMap<String, u64>,
}

/// Manifest version for a calendar date.
fn date_version(date: NaiveDate) -> u32 {
    ((date.year() - 2000) * 10000) as u32 + date.month() * 100 + date.day()
}

/// Write the manifest for a catalog.
///
/// Stamps the version from the current UTC date, then writes the level
/// and both file maps. The target is replaced atomically (temp file +
/// rename).
pub fn save_manifest(
    path: &Path,
    level: i32,
    data_files: BTreeMap<u64, u64>,
    common_files: BTreeMap<String, u64>,
) -> Result<(), ManifestError> {
    let record = ManifestRecord {
        version: date_version(Utc::now().date_naive()),
        level,
        data_files,
        common_files,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)?;
    let writer = BufWriter::new(file);

    bincode::serialize_into(writer, &record)
        .map_err(|e| io::Error::other(format!("Failed to serialize manifest: {}", e)))?;

    std::fs::rename(&temp_path, path)?;

    tracing::debug!(
        path = %path.display(),
        version = record.version,
        level = record.level,
        "Saved tile manifest"
    );

    Ok(())
}

/// Read the manifest and expand it into the sorted tile index.
///
/// Cell entries are encoded through [`CellId`] at the manifest's level;
/// common entries keep their filename as the id. The returned index is
/// sorted ascending by id, the invariant the region parser's binary
/// search relies on.
pub fn load_manifest(path: &Path) -> Result<(TileIndex, u32), ManifestError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let record: ManifestRecord = bincode::deserialize_from(reader)
        .map_err(|e| ManifestError::Corrupt(e.to_string()))?;

    let mut tiles = Vec::with_capacity(record.data_files.len() + record.common_files.len());
    for (&bits, &size) in &record.data_files {
        let id = CellId::from_bits_and_level(bits, record.level).encode();
        tiles.push(Tile::new(id, size));
    }
    for (name, &size) in &record.common_files {
        tiles.push(Tile::new(name.clone(), size));
    }

    Ok((TileIndex::new(tiles), record.version))
}

/// Lenient manifest boundary: load, or fall back to an empty catalog.
///
/// Any failure (missing file, short read, corrupt stream) is logged
/// and converted into an empty index with version 0. Callers must not
/// assume partial results; the index is either complete or empty.
pub fn load_tile_index(path: &Path) -> (TileIndex, u32) {
    match load_manifest(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Can't read tile manifest, treating catalog as empty"
            );
            (TileIndex::empty(), 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_date_version_arithmetic() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(date_version(date), 260806);

        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(date_version(date), 101);

        let date = NaiveDate::from_ymd_opt(2011, 12, 31).unwrap();
        assert_eq!(date_version(date), 111231);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tiles.bin");

        let mut data_files = BTreeMap::new();
        data_files.insert(0b0001_1011, 100); // "0123" at level 5 -> "00123"
        let mut common_files = BTreeMap::new();
        common_files.insert("x.dat".to_string(), 50);

        let before = date_version(Utc::now().date_naive());
        save_manifest(&path, 5, data_files, common_files).unwrap();
        let (index, version) = load_manifest(&path).unwrap();
        let after = date_version(Utc::now().date_naive());

        assert!(version == before || version == after);
        assert_eq!(index.len(), 2);

        let cell_id = CellId::from_bits_and_level(0b0001_1011, 5).encode();
        assert_eq!(cell_id, "00123");
        assert_eq!(index.resolve(&cell_id).unwrap().size, 100);
        assert_eq!(index.resolve("x.dat").unwrap().size, 50);

        // Sorted ascending by id
        let ids: Vec<&str> = index.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["00123", "x.dat"]);
    }

    #[test]
    fn test_load_truncated_fails_corrupt() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tiles.bin");
        // Fewer bytes than the fixed version + level header
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Corrupt(_)));
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let temp = TempDir::new().unwrap();
        let err = load_manifest(&temp.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[test]
    fn test_load_tile_index_falls_back_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tiles.bin");
        std::fs::write(&path, [0u8; 5]).unwrap();

        let (index, version) = load_tile_index(&path);
        assert!(index.is_empty());
        assert_eq!(version, 0);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tiles.bin");

        save_manifest(&path, 3, BTreeMap::new(), BTreeMap::new()).unwrap();

        let mut common = BTreeMap::new();
        common.insert("world.dat".to_string(), 7);
        save_manifest(&path, 3, BTreeMap::new(), common).unwrap();

        let (index, _) = load_manifest(&path).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("world.dat").unwrap().size, 7);
    }

    #[test]
    fn test_empty_manifest_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tiles.bin");

        save_manifest(&path, 0, BTreeMap::new(), BTreeMap::new()).unwrap();
        let (index, _) = load_manifest(&path).unwrap();
        assert!(index.is_empty());
    }
}
