//! Catalog directory scanner.
//!
//! Builds the file maps fed to [`save_manifest`](super::save_manifest)
//! by scanning a directory of tile files. Stems that are well-formed
//! cell ids at the catalog's level become cell entries keyed by their
//! bit path; everything else is recorded as a common file under its
//! full filename.

use std::collections::BTreeMap;
use std::path::Path;

use super::ManifestError;
use crate::cell::{is_valid_cell_id, CellId};

/// Scan one directory of tile files into manifest maps.
///
/// Only files ending in `extension` are considered; subdirectories and
/// other files are skipped. A stem like `"00123"` at level 5 lands in
/// the cell map; `"00123"` at any other level, or a name like
/// `"World"`, lands in the common map (a cell stem of the wrong length
/// would not round-trip through the fixed-width encoding).
pub fn scan_directory(
    dir: &Path,
    level: i32,
    extension: &str,
) -> Result<(BTreeMap<u64, u64>, BTreeMap<String, u64>), ManifestError> {
    let mut data_files = BTreeMap::new();
    let mut common_files = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = name.strip_suffix(extension) else {
            continue;
        };

        let size = entry.metadata()?.len();
        if is_valid_cell_id(stem) && level >= 0 && stem.len() == level as usize {
            match CellId::decode(stem) {
                Ok(cell) => {
                    data_files.insert(cell.bits(), size);
                }
                Err(_) => {
                    common_files.insert(name.to_string(), size);
                }
            }
        } else {
            common_files.insert(name.to_string(), size);
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        cells = data_files.len(),
        common = common_files.len(),
        "Scanned catalog directory"
    );

    Ok((data_files, common_files))
}
