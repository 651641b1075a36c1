//! Indentation-driven region description parser.
//!
//! Each non-blank line of the description is one entry; the count of
//! leading space characters selects its kind:
//!
//! - 0 spaces: a tile reference, resolved against the catalog for the
//!   node most recently descended into;
//! - 1–3 spaces: a node name at that depth of the tree (country group,
//!   country, region);
//! - 4 or more: malformed, the parse fails.
//!
//! Small catalogs name one tile after each region; large ones
//! enumerate many cell tiles under depth-0 lines. [`ResolutionMode`]
//! captures that split and is predicted once per parse from the
//! catalog size.

use thiserror::Error;

use super::tree::{NodeId, RegionTree};
use crate::catalog::{Tile, TileIndex};

/// Catalogs with more entries than this are assumed to enumerate
/// quadtree cell tiles rather than one tile per named region.
pub const CELL_MODE_THRESHOLD: usize = 1000;

/// Errors producing a region tree from a description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// A line is indented deeper than the three legal node depths.
    #[error("Malformed region line {line}: indent deeper than 3")]
    MalformedLine {
        /// 1-based line number in the description.
        line: usize,
    },

    /// The description produced no top-level regions.
    #[error("Region description produced no top-level regions")]
    EmptyTree,
}

/// Kind of a single region-description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Depth 0: a tile reference for the current node.
    TileRef(&'a str),
    /// Depth 1: a top-level country group.
    Group(&'a str),
    /// Depth 2: a country.
    Country(&'a str),
    /// Depth 3: a region within a country.
    Region(&'a str),
    /// Indented past depth 3.
    Invalid,
}

impl<'a> LineKind<'a> {
    /// Classify a non-blank line by its leading-space count.
    pub fn classify(line: &'a str) -> Self {
        let spaces = line.len() - line.trim_start_matches(' ').len();
        let text = &line[spaces..];
        match spaces {
            0 => LineKind::TileRef(text),
            1 => LineKind::Group(text),
            2 => LineKind::Country(text),
            3 => LineKind::Region(text),
            _ => LineKind::Invalid,
        }
    }
}

/// How node names relate to catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// The catalog enumerates cell tiles; depth-0 reference lines carry
    /// the tile ids.
    CellTiles,
    /// The catalog holds one tile per named region; node names resolve
    /// directly (with the data extension appended).
    NamedRegions,
}

impl ResolutionMode {
    /// Default policy: predict the mode from the catalog size.
    pub fn for_catalog_size(entries: usize) -> Self {
        if entries > CELL_MODE_THRESHOLD {
            ResolutionMode::CellTiles
        } else {
            ResolutionMode::NamedRegions
        }
    }
}

/// Parses region descriptions into a [`RegionTree`].
///
/// The builder carries the configured tile filename extension and the
/// mode policy; both come from configuration so the core never
/// hard-codes them.
#[derive(Debug, Clone)]
pub struct RegionTreeBuilder {
    extension: String,
    policy: fn(usize) -> ResolutionMode,
}

impl RegionTreeBuilder {
    /// Create a builder using the default size-based mode policy.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            policy: ResolutionMode::for_catalog_size,
        }
    }

    /// Replace the resolution-mode policy.
    pub fn with_policy(mut self, policy: fn(usize) -> ResolutionMode) -> Self {
        self.policy = policy;
        self
    }

    /// Parse `text` into `tree`, resolving entries against the catalog.
    ///
    /// The tree is cleared first and rebuilt wholesale. Parsing is not
    /// transactional: on failure the tree keeps whatever nodes were
    /// built before the bad line, and callers must discard it. Succeeds
    /// iff the finished tree has at least one top-level region.
    pub fn load_regions(
        &self,
        text: &str,
        index: &TileIndex,
        tree: &mut RegionTree,
    ) -> Result<(), RegionError> {
        let mode = (self.policy)(index.len());
        tracing::debug!(entries = index.len(), ?mode, "Parsing region description");

        tree.clear();
        let mut path: Vec<NodeId> = Vec::new();
        let mut current = tree.root();

        for (number, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let kind = LineKind::classify(line);
            match kind {
                LineKind::TileRef(reference) => {
                    if let Some(tile) = self.resolve_reference(reference, index) {
                        tree.add_tile(current, tile);
                    }
                }
                LineKind::Group(name) | LineKind::Country(name) | LineKind::Region(name) => {
                    let depth = match kind {
                        LineKind::Group(_) => 0,
                        LineKind::Country(_) => 1,
                        _ => 2,
                    };
                    current = insert_at_depth(tree, &mut path, depth, name);
                    if mode == ResolutionMode::NamedRegions {
                        let named = format!("{}{}", name, self.extension);
                        if let Some(found) = index.resolve(&named) {
                            tree.add_tile(current, found.clone());
                        }
                    }
                }
                LineKind::Invalid => {
                    return Err(RegionError::MalformedLine { line: number + 1 });
                }
            }
        }

        if tree.top_level_count() == 0 {
            return Err(RegionError::EmptyTree);
        }
        Ok(())
    }

    /// Resolve a depth-0 tile reference.
    ///
    /// Tries the exact reference first, then the reference with the
    /// data extension appended. The attached tile always carries the
    /// extension in its id. A miss resolves to nothing; unmatched
    /// references are simply skipped.
    fn resolve_reference(&self, reference: &str, index: &TileIndex) -> Option<Tile> {
        if let Some(found) = index.resolve(reference) {
            return Some(Tile::new(
                format!("{}{}", found.id, self.extension),
                found.size,
            ));
        }
        let with_ext = format!("{}{}", reference, self.extension);
        index
            .resolve(&with_ext)
            .map(|found| Tile::new(with_ext, found.size))
    }
}

/// Truncate the descent path to `depth`, then create or look up a
/// child of the ancestor there and descend into it.
///
/// `depth` is 0-based relative to the root's immediate children. Depths
/// past the currently descended path are a caller contract violation;
/// the classifier's 1–3 space bound keeps them unreachable from
/// `load_regions`.
fn insert_at_depth(
    tree: &mut RegionTree,
    path: &mut Vec<NodeId>,
    depth: usize,
    name: &str,
) -> NodeId {
    path.truncate(depth);
    let parent = path.last().copied().unwrap_or_else(|| tree.root());
    let id = tree.add_child(parent, name);
    path.push(id);
    id
}
