//! Arena-backed region tree.
//!
//! Nodes live in a flat arena and reference each other by [`NodeId`],
//! with a distinguished unnamed root at index 0. A node's tile list
//! holds only tiles resolved for that node during parsing; children's
//! tiles are never folded in, so callers aggregate explicitly where
//! they need totals across a subtree.

use crate::catalog::Tile;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A named node holding its resolved tiles and child links.
#[derive(Debug, Clone)]
pub struct RegionNode {
    name: String,
    tiles: Vec<Tile>,
    children: Vec<NodeId>,
}

impl RegionNode {
    fn new(name: String) -> Self {
        Self {
            name,
            tiles: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Node name; empty for the root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tiles resolved directly onto this node.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// The region tree: an arena of nodes under an unnamed root.
#[derive(Debug, Clone)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
}

impl RegionTree {
    /// Create a tree holding only the empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![RegionNode::new(String::new())],
        }
    }

    /// The unnamed top-level anchor node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &RegionNode {
        &self.nodes[id.0]
    }

    /// Direct children of a node, in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Create a child of `parent` named `name`, or return the existing
    /// child of that name.
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let existing = self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name == name);
        if let Some(id) = existing {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(RegionNode::new(name.to_string()));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Attach a resolved tile to a node.
    pub fn add_tile(&mut self, id: NodeId, tile: Tile) {
        self.nodes[id.0].tiles.push(tile);
    }

    /// Number of direct children of the root.
    ///
    /// The builder's overall success signal: a parse that produced no
    /// top-level regions failed.
    pub fn top_level_count(&self) -> usize {
        self.nodes[0].children.len()
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Reset to an empty root. Idempotent.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(RegionNode::new(String::new()));
    }
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::new()
    }
}
