//! Dependency and module trees produced by the resolver.
//!
//! Both are plain owned trees: the dependency relation may contain cycles,
//! but a back-edge is cut into a childless sentinel node, so the data
//! structure itself never is a graph.

use serde::{Deserialize, Serialize};

/// Suffix appended to a package identifier to mark a cycle sentinel.
pub const CYCLE_MARKER: &str = " (cycle detected)";

/// A rooted tree of named nodes with ordered children.
pub trait TreeNode: Sized {
    fn label(&self) -> &str;
    fn children(&self) -> &[Self];

    /// Whether this node was cut short because its package is already on the
    /// path from the root.
    fn is_cycle(&self) -> bool {
        self.label().ends_with(CYCLE_MARKER)
    }

    /// Total number of nodes in this subtree, including `self`.
    fn node_count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// A node in the package dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTreeNode {
    /// Package identifier, e.g. `0x1::AptosFramework`.
    pub name: String,
    #[serde(rename = "dependencies")]
    pub children: Vec<DependencyTreeNode>,
}

impl DependencyTreeNode {
    pub fn new(name: impl Into<String>, children: Vec<DependencyTreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Sentinel for a package already on the current path.
    pub fn cycle(id: &str) -> Self {
        Self::leaf(format!("{id}{CYCLE_MARKER}"))
    }
}

impl TreeNode for DependencyTreeNode {
    fn label(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// A node in the module tree: packages are internal nodes, modules are leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTreeNode {
    /// Package identifier for packages, `<address>::<module>` for modules.
    pub name: String,
    pub children: Vec<ModuleTreeNode>,
}

impl ModuleTreeNode {
    pub fn new(name: impl Into<String>, children: Vec<ModuleTreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn cycle(id: &str) -> Self {
        Self::leaf(format!("{id}{CYCLE_MARKER}"))
    }
}

impl TreeNode for ModuleTreeNode {
    fn label(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
