//! Tile catalog: the manifest of known tiles and the sorted lookup index.
//!
//! The catalog is the full list of downloadable files the map server
//! offers. It persists as a binary manifest ([`manifest`]) and is
//! consumed in-memory as a [`TileIndex`], a list sorted by tile id so
//! the region parser can resolve references by binary search.

mod manifest;
mod scan;

pub use manifest::{load_manifest, load_tile_index, save_manifest, ManifestError};
pub use scan::scan_directory;

/// A downloadable catalog entry: its key and authoritative remote size.
///
/// The id is either a quadtree cell-id string (optionally carrying the
/// data file extension once resolved) or an arbitrary "common" filename.
/// Tiles are plain value records; ordering is by id first, which is what
/// the sorted index relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tile {
    /// Catalog key.
    pub id: String,
    /// Remote size in bytes.
    pub size: u64,
}

impl Tile {
    /// Create a new tile record.
    pub fn new(id: impl Into<String>, size: u64) -> Self {
        Self {
            id: id.into(),
            size,
        }
    }
}

/// The catalog's tile list, sorted ascending by id.
///
/// Ids are unique within a valid manifest, so binary search finds at
/// most one match.
#[derive(Debug, Clone, Default)]
pub struct TileIndex {
    tiles: Vec<Tile>,
}

impl TileIndex {
    /// Build an index from an arbitrary tile list, sorting it.
    pub fn new(mut tiles: Vec<Tile>) -> Self {
        tiles.sort();
        Self { tiles }
    }

    /// An index with no tiles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a tile by exact id.
    pub fn resolve(&self, id: &str) -> Option<&Tile> {
        self.tiles
            .binary_search_by(|tile| tile.id.as_str().cmp(id))
            .ok()
            .map(|i| &self.tiles[i])
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The sorted tile list.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate over the sorted tiles.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Sum of all remote sizes.
    pub fn total_size(&self) -> u64 {
        self.tiles.iter().map(|t| t.size).sum()
    }
}
