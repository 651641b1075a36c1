//! Per-node tile aggregation.
//!
//! Aggregation never walks the tree: it covers exactly the tiles
//! attached to the node it is given. Callers wanting subtree totals
//! visit children themselves.

use super::tree::RegionNode;
use crate::geom::{Rect, TileGeometry};
use crate::storage::StorageProbe;

/// Local and remote byte totals for a node's tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePair {
    /// Bytes of tiles present in local storage.
    pub local: u64,
    /// Authoritative remote bytes across all tiles.
    pub remote: u64,
}

/// Union of the bounding rectangles of every tile attached to `node`.
///
/// An empty tile list yields the degenerate [`Rect::EMPTY`].
pub fn bounds<G: TileGeometry>(node: &RegionNode, geometry: &G) -> Rect {
    let mut rect = Rect::EMPTY;
    for tile in node.tiles() {
        rect.expand(&geometry.bounds_of(&tile.id));
    }
    rect
}

/// Sum the node's tile sizes, splitting by local presence.
///
/// Remote always accumulates; local accumulates only for tiles the
/// probe reports present. Presence is an existence check, not a size
/// comparison, so a partially downloaded tile counts as fully local.
pub fn size<P: StorageProbe>(node: &RegionNode, probe: &P) -> SizePair {
    let mut sizes = SizePair::default();
    for tile in node.tiles() {
        if probe.exists(&tile.id) {
            sizes.local += tile.size;
        }
        sizes.remote += tile.size;
    }
    sizes
}
