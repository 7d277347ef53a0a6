//! Bottom-up subtree widths, top-down centring, one post-order pass.
//!
//! Each node occupies a fixed `node_width × node_height` box. A leaf's
//! subtree is exactly one box wide; an internal node's subtree is the sum of
//! its children's subtrees plus one `sibling_gap` between neighbours, and the
//! node is centred over that span. Every depth forms its own horizontal band.

use deptrace_core::tree::TreeNode;

/// Index of a node inside a [`PositionedTree`].
pub type NodeId = usize;

/// Fixed geometry used by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub sibling_gap: f64,
    pub level_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 40.0,
            sibling_gap: 24.0,
            level_gap: 56.0,
        }
    }
}

/// A node with its final coordinates (top-left corner of its box).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub label: String,
    pub cycle: bool,
    pub x: f64,
    pub y: f64,
    pub depth: usize,
    /// Horizontal footprint of this node and all its descendants.
    pub subtree_width: f64,
    /// Used for edge drawing only.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A straight connector from a parent's bottom-centre to a child's top-centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A laid-out tree. Node `0` is the root; nodes are stored in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedTree {
    pub nodes: Vec<PositionedNode>,
    pub config: LayoutConfig,
    /// Vertical offset the tree was laid out at.
    pub top: f64,
    /// Maximum of `x + node_width` over all nodes.
    pub width: f64,
    /// Maximum of `y + node_height` over all nodes.
    pub height: f64,
}

impl PositionedTree {
    pub fn root(&self) -> &PositionedNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &PositionedNode {
        &self.nodes[id]
    }

    /// Connectors for every parent/child pair, computed from final coordinates.
    pub fn edges(&self) -> Vec<Edge> {
        let half = self.config.node_width / 2.0;
        self.nodes
            .iter()
            .filter_map(|node| {
                let parent = &self.nodes[node.parent?];
                Some(Edge {
                    x1: parent.x + half,
                    y1: parent.y + self.config.node_height,
                    x2: node.x + half,
                    y2: node.y,
                })
            })
            .collect()
    }
}

/// Lay out `tree` with its root band starting at `vertical_offset`.
pub fn layout<T: TreeNode>(tree: &T, vertical_offset: f64, config: &LayoutConfig) -> PositionedTree {
    let mut placer = Placer {
        config,
        top: vertical_offset,
        nodes: Vec::with_capacity(tree.node_count()),
        max_x: 0.0,
        max_y: 0.0,
    };
    placer.place(tree, None, 0, 0.0);
    tracing::debug!(
        "Laid out {} nodes in {}x{}",
        placer.nodes.len(),
        placer.max_x,
        placer.max_y
    );

    PositionedTree {
        nodes: placer.nodes,
        config: *config,
        top: vertical_offset,
        width: placer.max_x,
        height: placer.max_y,
    }
}

struct Placer<'c> {
    config: &'c LayoutConfig,
    top: f64,
    nodes: Vec<PositionedNode>,
    max_x: f64,
    max_y: f64,
}

impl Placer<'_> {
    fn place<T: TreeNode>(
        &mut self,
        node: &T,
        parent: Option<NodeId>,
        depth: usize,
        x_offset: f64,
    ) -> NodeId {
        let cfg = *self.config;
        let id = self.nodes.len();
        self.nodes.push(PositionedNode {
            label: node.label().to_string(),
            cycle: node.is_cycle(),
            x: x_offset,
            y: self.top + depth as f64 * (cfg.node_height + cfg.level_gap),
            depth,
            subtree_width: cfg.node_width,
            parent,
            children: Vec::with_capacity(node.children().len()),
        });

        let mut children = Vec::with_capacity(node.children().len());
        let mut cursor = x_offset;
        for child in node.children() {
            let child_id = self.place(child, Some(id), depth + 1, cursor);
            cursor += self.nodes[child_id].subtree_width + cfg.sibling_gap;
            children.push(child_id);
        }

        // Childless nodes keep the caller's offset and a one-box footprint.
        if !children.is_empty() {
            let span = (cursor - cfg.sibling_gap - x_offset).max(cfg.node_width);
            let this = &mut self.nodes[id];
            this.subtree_width = span;
            this.x = x_offset + (span - cfg.node_width) / 2.0;
        }

        let this = &mut self.nodes[id];
        this.children = children;
        self.max_x = self.max_x.max(this.x + cfg.node_width);
        self.max_y = self.max_y.max(this.y + cfg.node_height);
        id
    }
}
