//! Operation: trace one or more packages and print the results.

use std::path::{Path, PathBuf};

use deptrace_core::config::{GlobalConfig, RenderConfig};
use deptrace_core::network::Network;
use deptrace_core::package::PackageId;
use deptrace_layout::layout::LayoutConfig;
use deptrace_registry::cache::MetadataCache;
use deptrace_registry::download;
use deptrace_registry::node::FullNode;
use deptrace_registry::registry::CachedRegistry;
use deptrace_resolver::report::TraceReport;
use deptrace_resolver::resolver;
use deptrace_util::errors::DepTraceError;
use deptrace_util::progress::{spinner, status, status_warn};

use crate::output::{self, OutputFormat, TreeKind};

/// Options for `deptrace trace`.
#[derive(Debug, Default)]
pub struct TraceOptions {
    /// Root package identifiers, `<address>::<name>`.
    pub packages: Vec<String>,
    pub format: OutputFormat,
    /// Print the dependency tree of each root.
    pub tree: bool,
    /// Print the module tree of each root.
    pub module_tree: bool,
    /// Maximum depth of printed text trees.
    pub depth: Option<usize>,
    /// Only show unique dependencies and modules.
    pub dedupe: bool,
    /// Overrides `[network] default`.
    pub network: Option<Network>,
    /// Overrides the fullnode URL for the selected network.
    pub node_url: Option<String>,
    pub api_key: Option<String>,
    /// Serve everything from the metadata cache.
    pub offline: bool,
    pub cache_file: Option<PathBuf>,
    pub no_cache: bool,
    /// Write an SVG diagram to this file.
    pub svg: Option<PathBuf>,
    pub svg_tree: TreeKind,
}

/// Trace every requested root and print the report.
pub async fn trace(opts: &TraceOptions) -> miette::Result<()> {
    let config = GlobalConfig::load()?;
    trace_with_config(opts, &config).await
}

/// Same as [`trace`], with an already loaded configuration.
pub async fn trace_with_config(opts: &TraceOptions, config: &GlobalConfig) -> miette::Result<()> {
    if opts.packages.is_empty() {
        return Err(DepTraceError::Generic {
            message: "No package identifiers given".to_string(),
        }
        .into());
    }
    for id in &opts.packages {
        PackageId::parse(id)?;
    }

    let registry = build_registry(opts, config)?;
    let network = registry.node().network;
    status(
        "Tracing",
        &format!("{} on {network}", opts.packages.join(", ")),
    );

    let pb = spinner("Resolving dependencies...");
    let result = resolver::resolve_all(&opts.packages, &registry).await;
    pb.finish_and_clear();

    // Packages fetched before a failure are still valid.
    if let Err(e) = registry.save_cache() {
        tracing::warn!("Failed to save metadata cache: {e}");
        status_warn("Warning", &format!("{e}"));
    }
    let report = result?;
    tracing::debug!("{} registry requests", registry.requests());

    print!("{}", render(&report, opts)?);

    if let Some(path) = &opts.svg {
        write_svg(&report, path, opts.svg_tree, &config.render)?;
        status("Wrote", &format!("{} diagram to {}", opts.svg_tree, path.display()));
    }

    Ok(())
}

/// Everything printed to stdout for a finished trace.
pub fn render(report: &TraceReport, opts: &TraceOptions) -> Result<String, DepTraceError> {
    let mut out = match opts.format {
        OutputFormat::Json => output::format_json(report, opts.dedupe)? + "\n",
        OutputFormat::Table => output::format_table(report, opts.dedupe),
    };
    if opts.tree {
        out.push_str(&output::format_trees(report, TreeKind::Dependency, opts.depth));
    }
    if opts.module_tree {
        out.push_str(&output::format_trees(report, TreeKind::Module, opts.depth));
    }
    Ok(out)
}

fn build_registry(opts: &TraceOptions, config: &GlobalConfig) -> Result<CachedRegistry, DepTraceError> {
    let network = opts.network.unwrap_or(config.network.default);
    let node = match &opts.node_url {
        Some(url) => FullNode::new(network, url.clone()).with_api_key(config.network.api_key.clone()),
        None => FullNode::from_config(network, &config.network),
    }
    .with_api_key(opts.api_key.clone());
    tracing::debug!("Using fullnode {} (auth: {})", node.url, node.has_auth());

    let mut registry = CachedRegistry::new(download::build_client()?, node).offline(opts.offline);
    if let Some(path) = crate::cache_path(opts.cache_file.as_deref(), opts.no_cache, &config.cache) {
        registry = registry.with_cache(MetadataCache::open(path));
    }
    Ok(registry)
}

fn layout_config(render: &RenderConfig) -> LayoutConfig {
    LayoutConfig {
        node_width: render.node_width,
        node_height: render.node_height,
        sibling_gap: render.sibling_gap,
        level_gap: render.level_gap,
    }
}

fn write_svg(
    report: &TraceReport,
    path: &Path,
    kind: TreeKind,
    render: &RenderConfig,
) -> Result<(), DepTraceError> {
    let svg = output::format_svg(report, kind, layout_config(render));
    deptrace_util::fs::write_atomic(path, svg.as_bytes()).map_err(|e| DepTraceError::Generic {
        message: format!("Failed to write {}: {e}", path.display()),
    })
}
