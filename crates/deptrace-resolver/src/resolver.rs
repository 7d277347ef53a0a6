//! Core tracing algorithm: depth-first expansion with a per-branch path set.
//!
//! One traversal builds both the dependency tree and the module tree from a
//! single lookup per expanded node. A package already on the current path is
//! emitted as a cycle sentinel and not looked up again; a package reached
//! through two different parents is expanded under both.

use deptrace_core::metadata::PackageMetadata;
use deptrace_core::package::PackageId;
use deptrace_core::provider::MetadataProvider;
use deptrace_core::tree::{DependencyTreeNode, ModuleTreeNode};
use deptrace_util::errors::DepTraceError;
use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::accumulator::Accumulator;
use crate::path::PathSet;
use crate::report::{TraceReport, TraceResult};

/// Trace every dependency and module reachable from `root`.
///
/// Lookups are issued one at a time in traversal order. Any lookup failure
/// aborts the trace; no partial result is returned.
pub async fn resolve<P: MetadataProvider>(
    root: &str,
    provider: &P,
) -> Result<TraceResult, DepTraceError> {
    tracing::info!("Tracing dependencies of {root}");
    let mut tracer = Tracer::new(provider);
    let (dependency_tree, module_tree) = tracer.visit(root.to_string(), PathSet::new()).await?;

    let result = TraceResult::new(
        root.to_string(),
        dependency_tree,
        module_tree,
        tracer.dependencies,
        tracer.modules,
    );
    tracing::info!(
        "{root}: {} direct, {} total, {} unique dependencies",
        result.direct_dependency_count,
        result.all_dependency_count,
        result.deduped_dependency_count
    );
    Ok(result)
}

/// Trace several roots one after another and aggregate the results.
pub async fn resolve_all<P: MetadataProvider>(
    roots: &[String],
    provider: &P,
) -> Result<TraceReport, DepTraceError> {
    let mut results = Vec::with_capacity(roots.len());
    for root in roots {
        results.push(resolve(root, provider).await?);
    }
    Ok(TraceReport::from_results(results))
}

struct Tracer<'p, P> {
    provider: &'p P,
    dependencies: Accumulator,
    modules: Accumulator,
}

impl<'p, P: MetadataProvider> Tracer<'p, P> {
    fn new(provider: &'p P) -> Self {
        Self {
            provider,
            dependencies: Accumulator::new(),
            modules: Accumulator::new(),
        }
    }

    fn visit(
        &mut self,
        id: String,
        path: PathSet,
    ) -> LocalBoxFuture<'_, Result<(DependencyTreeNode, ModuleTreeNode), DepTraceError>> {
        async move {
            if path.contains(&id) {
                tracing::debug!("Cycle: {} -> {id}", path.chain());
                return Ok((DependencyTreeNode::cycle(&id), ModuleTreeNode::cycle(&id)));
            }

            let package = PackageId::parse(&id)?;
            let path = path.descend(&id);

            tracing::debug!("Expanding {id} at depth {}", path.depth());
            let metadata = self
                .provider
                .fetch(&package)
                .await
                .map_err(|e| e.for_package(&id))?;

            self.record(&package, &metadata);

            let mut dependency_children = Vec::with_capacity(metadata.deps.len());
            let mut module_children: Vec<ModuleTreeNode> = metadata
                .modules
                .iter()
                .map(|m| ModuleTreeNode::leaf(package.module_name(&m.name)))
                .collect();

            for dep in metadata.dependency_ids() {
                let (dependency, module) = self.visit(dep, path.clone()).await?;
                dependency_children.push(dependency);
                module_children.push(module);
            }

            Ok((
                DependencyTreeNode::new(id.clone(), dependency_children),
                ModuleTreeNode::new(id, module_children),
            ))
        }
        .boxed_local()
    }

    fn record(&mut self, package: &PackageId, metadata: &PackageMetadata) {
        for dep in metadata.dependency_ids() {
            self.dependencies.push(dep);
        }
        for module in &metadata.modules {
            self.modules.push(package.module_name(&module.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptrace_core::provider::InMemoryProvider;
    use deptrace_core::tree::TreeNode;

    fn count_cycles<T: TreeNode>(node: &T) -> usize {
        usize::from(node.is_cycle()) + node.children().iter().map(count_cycles).sum::<usize>()
    }

    fn assert_counts_consistent(r: &TraceResult) {
        assert_eq!(r.all_dependency_count, r.dependency_list.len());
        assert_eq!(r.deduped_dependency_count, r.deduped_dependency_list.len());
        let unique: std::collections::HashSet<_> = r.dependency_list.iter().collect();
        assert_eq!(r.deduped_dependency_count, unique.len());
        assert!(r.deduped_dependency_count <= r.all_dependency_count);
        assert_eq!(r.direct_dependency_count, r.dependency_tree.children.len());
        assert!(r.direct_dependency_count <= r.all_dependency_count);
        assert_eq!(r.all_module_count, r.module_list.len());
        assert_eq!(r.deduped_module_count, r.deduped_module_list.len());
    }

    /// A -> [B, C], B -> [C], C -> [].
    fn diamond() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_package(
                "0xa",
                PackageMetadata::new("A")
                    .with_module("a_mod")
                    .with_dep("0xb", "B")
                    .with_dep("0xc", "C"),
            )
            .with_package(
                "0xb",
                PackageMetadata::new("B")
                    .with_module("b_one")
                    .with_module("b_two")
                    .with_dep("0xc", "C"),
            )
            .with_package("0xc", PackageMetadata::new("C").with_module("c_mod"))
    }

    #[tokio::test]
    async fn shared_dependency_is_expanded_under_each_parent() {
        let provider = diamond();
        let r = resolve("0xa::A", &provider).await.unwrap();

        assert_eq!(r.all_dependency_count, 3);
        assert_eq!(r.dependency_list, vec!["0xb::B", "0xc::C", "0xc::C"]);
        assert_eq!(r.deduped_dependency_count, 2);
        assert_eq!(r.deduped_dependency_list, vec!["0xb::B", "0xc::C"]);
        assert_eq!(r.direct_dependency_count, 2);

        let expected = DependencyTreeNode::new(
            "0xa::A",
            vec![
                DependencyTreeNode::new("0xb::B", vec![DependencyTreeNode::leaf("0xc::C")]),
                DependencyTreeNode::leaf("0xc::C"),
            ],
        );
        assert_eq!(r.dependency_tree, expected);
        assert_counts_consistent(&r);
    }

    #[tokio::test]
    async fn module_tree_lists_modules_before_dependency_subtrees() {
        let provider = diamond();
        let r = resolve("0xa::A", &provider).await.unwrap();

        let expected = ModuleTreeNode::new(
            "0xa::A",
            vec![
                ModuleTreeNode::leaf("0xa::a_mod"),
                ModuleTreeNode::new(
                    "0xb::B",
                    vec![
                        ModuleTreeNode::leaf("0xb::b_one"),
                        ModuleTreeNode::leaf("0xb::b_two"),
                        ModuleTreeNode::new("0xc::C", vec![ModuleTreeNode::leaf("0xc::c_mod")]),
                    ],
                ),
                ModuleTreeNode::new("0xc::C", vec![ModuleTreeNode::leaf("0xc::c_mod")]),
            ],
        );
        assert_eq!(r.module_tree, expected);
        assert_eq!(
            r.module_list,
            vec![
                "0xa::a_mod",
                "0xb::b_one",
                "0xb::b_two",
                "0xc::c_mod",
                "0xc::c_mod"
            ]
        );
        assert_eq!(r.deduped_module_count, 4);
    }

    #[tokio::test]
    async fn one_lookup_per_expanded_node() {
        let provider = diamond();
        resolve("0xa::A", &provider).await.unwrap();
        assert_eq!(
            provider.fetched(),
            vec!["0xa::A", "0xb::B", "0xc::C", "0xc::C"]
        );
    }

    #[tokio::test]
    async fn self_dependency_yields_single_sentinel() {
        let provider =
            InMemoryProvider::new().with_package("0xa", PackageMetadata::new("A").with_dep("0xa", "A"));
        let r = resolve("0xa::A", &provider).await.unwrap();

        assert_eq!(r.all_dependency_count, 1);
        assert_eq!(r.direct_dependency_count, 1);
        assert_eq!(
            r.dependency_tree,
            DependencyTreeNode::new("0xa::A", vec![DependencyTreeNode::cycle("0xa::A")])
        );
        assert_eq!(count_cycles(&r.dependency_tree), 1);
        assert_eq!(count_cycles(&r.module_tree), 1);
        assert_eq!(provider.fetched(), vec!["0xa::A"]);
        assert_counts_consistent(&r);
    }

    #[tokio::test]
    async fn lookup_and_cycle_check_use_the_same_identifier() {
        let provider = InMemoryProvider::new()
            .with_package("0x1", PackageMetadata::new("A ").with_dep("0x1", "A "));
        let r = resolve("0x1::A ", &provider).await.unwrap();

        assert_eq!(provider.fetched(), vec!["0x1::A "]);
        assert_eq!(
            r.dependency_tree,
            DependencyTreeNode::new("0x1::A ", vec![DependencyTreeNode::cycle("0x1::A ")])
        );
        assert_eq!(r.package_id, "0x1::A ");
    }

    #[tokio::test]
    async fn longer_cycle_terminates_with_one_sentinel() {
        let provider = InMemoryProvider::new()
            .with_package("0x1", PackageMetadata::new("A").with_dep("0x1", "B"))
            .with_package("0x1", PackageMetadata::new("B").with_dep("0x1", "C"))
            .with_package("0x1", PackageMetadata::new("C").with_dep("0x1", "A"));
        let r = resolve("0x1::A", &provider).await.unwrap();

        assert_eq!(count_cycles(&r.dependency_tree), 1);
        assert_eq!(r.dependency_list, vec!["0x1::B", "0x1::C", "0x1::A"]);
        let c = &r.dependency_tree.children[0].children[0];
        assert_eq!(c.name, "0x1::C");
        assert_eq!(c.children, vec![DependencyTreeNode::cycle("0x1::A")]);
        assert_counts_consistent(&r);
    }

    #[tokio::test]
    async fn cycle_reached_from_two_branches_closes_on_each() {
        // A -> [B, C]; B -> A; C -> A: two independent closures.
        let provider = InMemoryProvider::new()
            .with_package(
                "0x1",
                PackageMetadata::new("A").with_dep("0x1", "B").with_dep("0x1", "C"),
            )
            .with_package("0x1", PackageMetadata::new("B").with_dep("0x1", "A"))
            .with_package("0x1", PackageMetadata::new("C").with_dep("0x1", "A"));
        let r = resolve("0x1::A", &provider).await.unwrap();
        assert_eq!(count_cycles(&r.dependency_tree), 2);
        assert_counts_consistent(&r);
    }

    #[tokio::test]
    async fn package_without_dependencies() {
        let provider =
            InMemoryProvider::new().with_package("0x1", PackageMetadata::new("MoveStdlib").with_module("vector"));
        let r = resolve("0x1::MoveStdlib", &provider).await.unwrap();

        assert_eq!(r.dependency_tree, DependencyTreeNode::leaf("0x1::MoveStdlib"));
        assert_eq!(r.all_dependency_count, 0);
        assert_eq!(r.direct_dependency_count, 0);
        assert_eq!(r.deduped_dependency_count, 0);
        assert_eq!(r.module_list, vec!["0x1::vector"]);
        assert_counts_consistent(&r);
    }

    #[tokio::test]
    async fn malformed_root_fails_before_lookup() {
        let provider = diamond();
        let err = resolve("not-a-package", &provider).await.unwrap_err();
        assert!(matches!(err, DepTraceError::MalformedIdentifier { ref id } if id == "not-a-package"));
        assert!(provider.fetched().is_empty());
    }

    #[tokio::test]
    async fn missing_transitive_dependency_aborts_with_its_id() {
        let provider = InMemoryProvider::new()
            .with_package("0x1", PackageMetadata::new("A").with_dep("0x1", "Gone"));
        let err = resolve("0x1::A", &provider).await.unwrap_err();
        match err {
            DepTraceError::NotFoundInRegistry { id, available } => {
                assert_eq!(id, "0x1::Gone");
                assert_eq!(available, vec!["A"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_all_combines_roots() {
        let provider = diamond();
        let roots = vec!["0xb::B".to_string(), "0xa::A".to_string()];
        let report = resolve_all(&roots, &provider).await.unwrap();

        assert_eq!(report.packages, roots);
        assert_eq!(report.per_package.len(), 2);
        assert_eq!(report.combined.dependency_count, 1 + 3);
        assert_eq!(report.combined.dependencies, vec!["0xc::C", "0xb::B"]);
        assert_eq!(report.combined.deduped_dependency_count, 2);
        assert_eq!(report.combined.deduped_module_count, 4);
    }

    #[tokio::test]
    async fn result_json_uses_camel_case() {
        let provider = diamond();
        let r = resolve("0xc::C", &provider).await.unwrap();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["packageId"], "0xc::C");
        assert_eq!(json["allDependencyCount"], 0);
        assert_eq!(json["dedupedModuleList"][0], "0xc::c_mod");
        assert_eq!(json["dependencyTree"]["name"], "0xc::C");
    }

    #[tokio::test]
    async fn resolution_is_deterministic() {
        let provider = diamond();
        let first = resolve("0xa::A", &provider).await.unwrap();
        let second = resolve("0xa::A", &provider).await.unwrap();
        assert_eq!(first, second);
    }
}
