//! Command dispatch and handler modules.

mod cache;
mod trace;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Trace {
            packages,
            format,
            tree,
            module_tree,
            depth,
            dedupe,
            network,
            node_url,
            api_key,
            offline,
            cache_file,
            no_cache,
            svg,
            svg_tree,
        } => {
            let opts = deptrace_ops::ops_trace::TraceOptions {
                packages,
                format,
                tree,
                module_tree,
                depth,
                dedupe,
                network,
                node_url,
                api_key,
                offline,
                cache_file,
                no_cache,
                svg,
                svg_tree,
            };
            trace::exec(&opts).await
        }
        Command::Cache { action } => cache::exec(action),
    }
}
