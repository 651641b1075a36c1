//! Hierarchical region tree over the tile catalog.
//!
//! Regions group catalog tiles under named nodes (country group,
//! country, region). The tree is built by [`RegionTreeBuilder`] from
//! an indented text description and queried per node through the
//! aggregators.

mod aggregate;
mod builder;
mod tree;

pub use aggregate::{bounds, size, SizePair};
pub use builder::{
    LineKind, RegionError, RegionTreeBuilder, ResolutionMode, CELL_MODE_THRESHOLD,
};
pub use tree::{NodeId, RegionNode, RegionTree};
