//! Dependency tracing engine: depth-first expansion of a package's declared
//! dependencies into a dependency tree and a module tree, with per-branch
//! cycle detection and flat/deduplicated tallies of everything reached.

pub mod accumulator;
pub mod path;
pub mod report;
pub mod resolver;
