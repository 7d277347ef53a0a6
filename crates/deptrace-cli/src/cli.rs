//! CLI argument definitions for deptrace.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use deptrace_core::network::Network;
use deptrace_ops::output::{OutputFormat, TreeKind};

#[derive(Parser, Debug)]
#[command(
    name = "deptrace",
    version,
    about = "Trace the on-chain dependencies of Aptos Move packages",
    long_about = "deptrace follows the declared dependencies of published Move packages \
                  through each address's package registry and reports the full dependency \
                  and module trees, with cycle detection, counts, and SVG diagrams."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trace the dependencies of one or more packages
    Trace {
        /// Package identifiers, e.g. 0x1::AptosFramework
        #[arg(required = true, value_name = "PACKAGE_ID")]
        packages: Vec<String>,
        /// Output format: json or table
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
        /// Print the dependency tree
        #[arg(long)]
        tree: bool,
        /// Print the module tree
        #[arg(long)]
        module_tree: bool,
        /// Maximum depth of printed trees
        #[arg(long)]
        depth: Option<usize>,
        /// Only show unique dependencies and modules
        #[arg(long)]
        dedupe: bool,
        /// Network: mainnet, testnet, devnet or local
        #[arg(short, long)]
        network: Option<Network>,
        /// Fullnode REST URL, overriding the network default
        #[arg(long)]
        node_url: Option<String>,
        /// Fullnode API key
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,
        /// Use only cached package metadata
        #[arg(long)]
        offline: bool,
        /// Metadata cache file
        #[arg(long)]
        cache_file: Option<PathBuf>,
        /// Neither read nor write the metadata cache
        #[arg(long, conflicts_with = "offline")]
        no_cache: bool,
        /// Write an SVG diagram to this file
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
        /// Tree drawn in the SVG: dependency or module
        #[arg(long, default_value = "dependency")]
        svg_tree: TreeKind,
    },

    /// Manage the package metadata cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show cache location, size and package counts
    Info {
        /// Metadata cache file
        #[arg(long)]
        cache_file: Option<PathBuf>,
    },
    /// Delete the metadata cache
    Clean {
        /// Metadata cache file
        #[arg(long)]
        cache_file: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
