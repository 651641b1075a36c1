//! End-to-end catalog flow: scan a directory of tile files, persist
//! the manifest, reload it, build the region tree from a description,
//! and aggregate per-node sizes against the same directory.

use std::path::Path;

use tempfile::TempDir;

use tilepack::catalog::{load_manifest, load_tile_index, save_manifest, scan_directory};
use tilepack::region::{size, RegionTree, RegionTreeBuilder};
use tilepack::storage::DirectoryProbe;

const EXT: &str = ".tile";
const LEVEL: i32 = 4;

fn write_tile(dir: &Path, name: &str, len: usize) {
    std::fs::write(dir.join(name), vec![0u8; len]).unwrap();
}

#[test]
fn test_scan_save_load_parse_aggregate() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path();

    // A small named-region catalog: one tile per region plus a world
    // overview, all below the cell-mode threshold
    write_tile(data_dir, "Norway.tile", 1000);
    write_tile(data_dir, "Sweden.tile", 2000);
    write_tile(data_dir, "WorldCoasts.tile", 300);

    let (data_files, common_files) = scan_directory(data_dir, LEVEL, EXT).unwrap();
    assert!(data_files.is_empty());
    assert_eq!(common_files.len(), 3);

    let manifest_path = data_dir.join("tiles.bin");
    save_manifest(&manifest_path, LEVEL, data_files, common_files).unwrap();

    let (index, version) = load_manifest(&manifest_path).unwrap();
    assert_eq!(index.len(), 3);
    assert!(version > 0);

    let description = " Scandinavia\n  Norway\n  Sweden\n  Finland\n";
    let builder = RegionTreeBuilder::new(EXT);
    let mut tree = RegionTree::new();
    builder.load_regions(description, &index, &mut tree).unwrap();

    assert_eq!(tree.top_level_count(), 1);
    let group = tree.children(tree.root())[0];
    let countries = tree.children(group);
    assert_eq!(countries.len(), 3);

    // Norway and Sweden resolved to their catalog tiles; Finland has none
    let probe = DirectoryProbe::new(data_dir);
    let norway = tree.node(countries[0]);
    assert_eq!(norway.name(), "Norway");
    let norway_size = size(norway, &probe);
    assert_eq!(norway_size.local, 1000);
    assert_eq!(norway_size.remote, 1000);

    let finland = tree.node(countries[2]);
    assert_eq!(finland.name(), "Finland");
    assert!(finland.tiles().is_empty());

    // Delete Sweden's file: remote size stays, local drops to zero
    std::fs::remove_file(data_dir.join("Sweden.tile")).unwrap();
    let sweden = tree.node(countries[1]);
    let sweden_size = size(sweden, &probe);
    assert_eq!(sweden_size.local, 0);
    assert_eq!(sweden_size.remote, 2000);
}

#[test]
fn test_cell_catalog_end_to_end() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path();

    // Cell-addressed tiles at level 4
    write_tile(data_dir, "0000.tile", 10);
    write_tile(data_dir, "0001.tile", 20);
    write_tile(data_dir, "3210.tile", 30);

    let (data_files, common_files) = scan_directory(data_dir, LEVEL, EXT).unwrap();
    assert_eq!(data_files.len(), 3);
    assert!(common_files.is_empty());

    let manifest_path = data_dir.join("tiles.bin");
    save_manifest(&manifest_path, LEVEL, data_files, common_files).unwrap();
    let (index, _) = load_manifest(&manifest_path).unwrap();

    // Manifest ids are bare cell strings; the description references
    // them on depth-0 lines
    assert!(index.resolve("0000").is_some());
    assert!(index.resolve("0000.tile").is_none());

    let description = " TestCountry\n0000\n0001\n3210\n1111\n";
    let builder =
        RegionTreeBuilder::new(EXT).with_policy(|_| tilepack::region::ResolutionMode::CellTiles);
    let mut tree = RegionTree::new();
    builder.load_regions(description, &index, &mut tree).unwrap();

    let country = tree.node(tree.children(tree.root())[0]);
    assert_eq!(country.tiles().len(), 3);
    // Resolved tiles carry the extension, so they line up with the
    // files on disk
    let probe = DirectoryProbe::new(data_dir);
    let sizes = size(country, &probe);
    assert_eq!(sizes.local, 60);
    assert_eq!(sizes.remote, 60);
}

#[test]
fn test_corrupt_manifest_yields_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("tiles.bin");
    std::fs::write(&manifest_path, b"not a manifest").unwrap();

    let (index, version) = load_tile_index(&manifest_path);
    assert!(index.is_empty());
    assert_eq!(version, 0);

    // An empty catalog still parses a description, producing bare nodes
    let builder = RegionTreeBuilder::new(EXT);
    let mut tree = RegionTree::new();
    builder
        .load_regions(" Somewhere\n", &index, &mut tree)
        .unwrap();
    assert_eq!(tree.top_level_count(), 1);
    assert!(tree.node(tree.children(tree.root())[0]).tiles().is_empty());
}
