use std::collections::HashSet;

/// Append-only tally of identifiers: every occurrence in traversal order,
/// plus the unique ones in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    all: Vec<String>,
    unique: Vec<String>,
    seen: HashSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: String) {
        if self.seen.insert(id.clone()) {
            self.unique.push(id.clone());
        }
        self.all.push(id);
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn unique(&self) -> &[String] {
        &self.unique
    }

    /// Consume into `(all, unique)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.all, self.unique)
    }
}
