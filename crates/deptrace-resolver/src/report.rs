//! Trace results for one root and the aggregate over several roots.

use deptrace_core::tree::{DependencyTreeNode, ModuleTreeNode};
use serde::{Deserialize, Serialize};

use crate::accumulator::Accumulator;

/// Everything learned from tracing one root package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResult {
    pub package_id: String,
    /// Every dependency reference reached, in traversal order, with repeats.
    pub dependency_list: Vec<String>,
    /// Unique dependency identifiers in first-seen order.
    pub deduped_dependency_list: Vec<String>,
    pub dependency_tree: DependencyTreeNode,
    pub module_tree: ModuleTreeNode,
    pub direct_dependency_count: usize,
    pub all_dependency_count: usize,
    pub deduped_dependency_count: usize,
    pub module_list: Vec<String>,
    pub deduped_module_list: Vec<String>,
    pub all_module_count: usize,
    pub deduped_module_count: usize,
}

impl TraceResult {
    pub(crate) fn new(
        package_id: String,
        dependency_tree: DependencyTreeNode,
        module_tree: ModuleTreeNode,
        dependencies: Accumulator,
        modules: Accumulator,
    ) -> Self {
        let (dependency_list, deduped_dependency_list) = dependencies.into_parts();
        let (module_list, deduped_module_list) = modules.into_parts();
        Self {
            package_id,
            direct_dependency_count: dependency_tree.children.len(),
            all_dependency_count: dependency_list.len(),
            deduped_dependency_count: deduped_dependency_list.len(),
            all_module_count: module_list.len(),
            deduped_module_count: deduped_module_list.len(),
            dependency_list,
            deduped_dependency_list,
            dependency_tree,
            module_tree,
            module_list,
            deduped_module_list,
        }
    }
}

/// Totals across every traced root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSummary {
    /// Sum of each root's dependency count (with repeats).
    pub dependency_count: usize,
    pub deduped_dependency_count: usize,
    /// Unique dependencies across all roots, first-seen order.
    pub dependencies: Vec<String>,
    pub module_count: usize,
    pub deduped_module_count: usize,
    pub modules: Vec<String>,
}

/// The result of tracing one or more root packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceReport {
    pub packages: Vec<String>,
    pub per_package: Vec<TraceResult>,
    pub combined: CombinedSummary,
}

impl TraceReport {
    pub fn from_results(results: Vec<TraceResult>) -> Self {
        let mut dependencies = Accumulator::new();
        let mut modules = Accumulator::new();
        let mut dependency_count = 0;
        let mut module_count = 0;

        for result in &results {
            dependency_count += result.all_dependency_count;
            module_count += result.all_module_count;
            for dep in &result.deduped_dependency_list {
                dependencies.push(dep.clone());
            }
            for module in &result.deduped_module_list {
                modules.push(module.clone());
            }
        }

        let (_, dependencies) = dependencies.into_parts();
        let (_, modules) = modules.into_parts();
        Self {
            packages: results.iter().map(|r| r.package_id.clone()).collect(),
            combined: CombinedSummary {
                dependency_count,
                deduped_dependency_count: dependencies.len(),
                dependencies,
                module_count,
                deduped_module_count: modules.len(),
                modules,
            },
            per_package: results,
        }
    }
}
