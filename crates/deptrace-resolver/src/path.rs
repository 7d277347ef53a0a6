//! The set of packages on the active root-to-node path.

/// Packages currently being expanded between the root and the node being
/// visited, in path order.
///
/// Descending produces a new snapshot and leaves `self` untouched, so sibling
/// branches never see each other's packages. A package reachable through two
/// independent parents is therefore expanded under both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    ids: Vec<String>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of this path extended with `id`.
    pub fn descend(&self, id: &str) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.extend(self.ids.iter().cloned());
        ids.push(id.to_string());
        Self { ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|p| p == id)
    }

    pub fn depth(&self) -> usize {
        self.ids.len()
    }

    /// `a -> b -> c`, for log messages.
    pub fn chain(&self) -> String {
        self.ids.join(" -> ")
    }
}
