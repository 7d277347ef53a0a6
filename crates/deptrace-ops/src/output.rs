//! Rendering a [`TraceReport`] for the terminal.

use std::fmt;
use std::str::FromStr;

use deptrace_layout::layout::LayoutConfig;
use deptrace_layout::svg::Diagram;
use deptrace_layout::text::render_text_with_depth;
use deptrace_resolver::report::{TraceReport, TraceResult};
use deptrace_util::errors::DepTraceError;
use serde::Serialize;

const TABLE_HEADER: &str = "Package                | Direct Deps | All Deps | Deduped Deps";
const DEDUPED_TABLE_HEADER: &str = "Package                | Deduped Deps | Deduped Modules";

/// Primary output format for `deptrace trace`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl FromStr for OutputFormat {
    type Err = DepTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            other => Err(DepTraceError::Config {
                message: format!("Unknown format '{other}', expected 'json' or 'table'"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Table => "table",
        })
    }
}

/// Which of the two trees of a trace to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeKind {
    #[default]
    Dependency,
    Module,
}

impl FromStr for TreeKind {
    type Err = DepTraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dependency" | "dependencies" | "deps" => Ok(Self::Dependency),
            "module" | "modules" => Ok(Self::Module),
            other => Err(DepTraceError::Config {
                message: format!("Unknown tree '{other}', expected 'dependency' or 'module'"),
            }),
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dependency => "dependency",
            Self::Module => "module",
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DedupedResult<'a> {
    package_id: &'a str,
    deduped_dependency_list: &'a [String],
    deduped_dependency_count: usize,
    deduped_module_list: &'a [String],
    deduped_module_count: usize,
}

impl<'a> From<&'a TraceResult> for DedupedResult<'a> {
    fn from(r: &'a TraceResult) -> Self {
        Self {
            package_id: &r.package_id,
            deduped_dependency_list: &r.deduped_dependency_list,
            deduped_dependency_count: r.deduped_dependency_count,
            deduped_module_list: &r.deduped_module_list,
            deduped_module_count: r.deduped_module_count,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DedupedCombined<'a> {
    deduped_dependency_count: usize,
    dependencies: &'a [String],
    deduped_module_count: usize,
    modules: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DedupedReport<'a> {
    packages: &'a [String],
    per_package: Vec<DedupedResult<'a>>,
    combined: DedupedCombined<'a>,
}

/// Pretty JSON. A single root prints its own result; several roots print
/// the whole report with the combined summary.
pub fn format_json(report: &TraceReport, dedupe: bool) -> Result<String, DepTraceError> {
    let json = match (report.per_package.as_slice(), dedupe) {
        ([single], false) => serde_json::to_string_pretty(single),
        ([single], true) => serde_json::to_string_pretty(&DedupedResult::from(single)),
        (_, false) => serde_json::to_string_pretty(report),
        (results, true) => serde_json::to_string_pretty(&DedupedReport {
            packages: &report.packages,
            per_package: results.iter().map(DedupedResult::from).collect(),
            combined: DedupedCombined {
                deduped_dependency_count: report.combined.deduped_dependency_count,
                dependencies: &report.combined.dependencies,
                deduped_module_count: report.combined.deduped_module_count,
                modules: &report.combined.modules,
            },
        }),
    };
    json.map_err(|e| DepTraceError::Generic {
        message: format!("Failed to serialize trace report: {e}"),
    })
}

/// Fixed-width table, one row per root, then a combined block when more
/// than one root was traced.
pub fn format_table(report: &TraceReport, dedupe: bool) -> String {
    let header = if dedupe { DEDUPED_TABLE_HEADER } else { TABLE_HEADER };
    let mut out = format!("{header}\n{}\n", "-".repeat(62));

    for r in &report.per_package {
        let row = if dedupe {
            format!(
                "{:<23}| {:<13}| {:<15}",
                r.package_id, r.deduped_dependency_count, r.deduped_module_count
            )
        } else {
            format!(
                "{:<23}| {:<11}| {:<8}| {:<12}",
                r.package_id,
                r.direct_dependency_count,
                r.all_dependency_count,
                r.deduped_dependency_count
            )
        };
        out.push_str(row.trim_end());
        out.push('\n');
    }

    if report.per_package.len() > 1 {
        let c = &report.combined;
        out.push_str("\nCombined (all packages):\n");
        if !dedupe {
            out.push_str(&format!("All Deps (with duplicates): {}\n", c.dependency_count));
        }
        out.push_str(&format!("Deduped Dependency Count: {}\n", c.deduped_dependency_count));
        out.push_str(&format!("Deduped Dependencies: {}\n", c.dependencies.join(", ")));
        if !dedupe {
            out.push_str(&format!("All Modules (with duplicates): {}\n", c.module_count));
        }
        out.push_str(&format!("Deduped Module Count: {}\n", c.deduped_module_count));
        out.push_str(&format!("Deduped Modules: {}\n", c.modules.join(", ")));
    }
    out
}

/// Box-drawn text trees of the requested kind, one per root.
pub fn format_trees(report: &TraceReport, kind: TreeKind, depth: Option<usize>) -> String {
    let title = match kind {
        TreeKind::Dependency => "Dependency Tree",
        TreeKind::Module => "Module Tree",
    };
    let mut out = String::new();
    for r in &report.per_package {
        let tree = match kind {
            TreeKind::Dependency => render_text_with_depth(&r.dependency_tree, depth),
            TreeKind::Module => render_text_with_depth(&r.module_tree, depth),
        };
        out.push_str(&format!("\n{title} ({}):\n{tree}", r.package_id));
    }
    out
}

/// Stack the chosen tree of every root into one SVG document.
pub fn format_svg(report: &TraceReport, kind: TreeKind, config: LayoutConfig) -> String {
    let mut diagram = Diagram::new(config);
    for r in &report.per_package {
        let placed = match kind {
            TreeKind::Dependency => diagram.push(&r.dependency_tree),
            TreeKind::Module => diagram.push(&r.module_tree),
        };
        tracing::debug!("Laid out {} nodes for {}", placed.nodes.len(), r.package_id);
    }
    tracing::debug!("Diagram is {}x{}", diagram.width(), diagram.height());
    diagram.to_svg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deptrace_core::metadata::PackageMetadata;
    use deptrace_core::provider::InMemoryProvider;
    use deptrace_resolver::resolver::resolve_all;

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_package(
                "0x1",
                PackageMetadata::new("A")
                    .with_module("a")
                    .with_dep("0x1", "B")
                    .with_dep("0x1", "C"),
            )
            .with_package(
                "0x1",
                PackageMetadata::new("B").with_module("b").with_dep("0x1", "C"),
            )
            .with_package("0x1", PackageMetadata::new("C").with_module("c"))
    }

    async fn report(roots: &[&str]) -> TraceReport {
        let roots: Vec<String> = roots.iter().map(|s| s.to_string()).collect();
        resolve_all(&roots, &provider()).await.unwrap()
    }

    #[tokio::test]
    async fn single_root_json_is_the_result_itself() {
        let json = format_json(&report(&["0x1::A"]).await, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["packageId"], "0x1::A");
        assert_eq!(value["allDependencyCount"], 3);
        assert_eq!(value["dependencyTree"]["dependencies"][0]["name"], "0x1::B");
    }

    #[tokio::test]
    async fn multi_root_json_has_combined_summary() {
        let json = format_json(&report(&["0x1::A", "0x1::B"]).await, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["packages"], serde_json::json!(["0x1::A", "0x1::B"]));
        assert_eq!(value["combined"]["dependencyCount"], 4);
        assert_eq!(value["combined"]["dedupedDependencyCount"], 2);
    }

    #[tokio::test]
    async fn deduped_json_omits_repeated_lists() {
        let json = format_json(&report(&["0x1::A"]).await, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dedupedDependencyList"], serde_json::json!(["0x1::B", "0x1::C"]));
        assert!(value.get("dependencyList").is_none());
        assert!(value.get("dependencyTree").is_none());

        let json = format_json(&report(&["0x1::A", "0x1::C"]).await, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["combined"].get("dependencyCount").is_none());
        assert_eq!(value["perPackage"][1]["dedupedDependencyCount"], 0);
    }

    #[tokio::test]
    async fn table_rows_are_padded() {
        let table = format_table(&report(&["0x1::A"]).await, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "-".repeat(62));
        assert_eq!(lines[2], "0x1::A                 | 2          | 3       | 2");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn table_with_several_roots_adds_combined_block() {
        let table = format_table(&report(&["0x1::A", "0x1::B"]).await, false);
        assert!(table.contains("Combined (all packages):"));
        assert!(table.contains("All Deps (with duplicates): 4\n"));
        assert!(table.contains("Deduped Dependencies: 0x1::B, 0x1::C\n"));
        assert!(table.contains("Deduped Modules: 0x1::a, 0x1::b, 0x1::c\n"));

        let deduped = format_table(&report(&["0x1::A", "0x1::B"]).await, true);
        assert!(deduped.starts_with(DEDUPED_TABLE_HEADER));
        assert!(!deduped.contains("with duplicates"));
    }

    #[tokio::test]
    async fn trees_are_titled_per_root() {
        let text = format_trees(&report(&["0x1::A"]).await, TreeKind::Dependency, None);
        assert_eq!(
            text,
            "\nDependency Tree (0x1::A):\n0x1::A\n├── 0x1::B\n│   └── 0x1::C\n└── 0x1::C\n"
        );

        let modules = format_trees(&report(&["0x1::C"]).await, TreeKind::Module, None);
        assert_eq!(modules, "\nModule Tree (0x1::C):\n0x1::C\n└── 0x1::c\n");
    }

    #[tokio::test]
    async fn svg_stacks_every_root() {
        let svg = format_svg(
            &report(&["0x1::A", "0x1::C"]).await,
            TreeKind::Dependency,
            LayoutConfig::default(),
        );
        assert_eq!(svg.matches("<svg").count(), 1);
        // A, B, C, C under the first root plus C for the second.
        assert_eq!(svg.matches("<text").count(), 5);
    }

    #[test]
    fn format_and_tree_kind_parse() {
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("module".parse::<TreeKind>().unwrap(), TreeKind::Module);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
