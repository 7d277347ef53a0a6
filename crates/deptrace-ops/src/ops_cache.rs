//! Operation: inspect or delete the package metadata cache.

use std::path::{Path, PathBuf};

use deptrace_core::config::GlobalConfig;
use deptrace_registry::cache::MetadataCache;
use deptrace_util::fs::{file_size, format_size};

fn resolve(explicit: Option<&Path>) -> miette::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(PathBuf::from(GlobalConfig::load()?.cache.file)),
    }
}

/// Print where the cache lives, its size, and how many packages it holds.
pub fn info(cache_file: Option<&Path>) -> miette::Result<()> {
    let path = resolve(cache_file)?;
    print!("{}", describe(&path));
    Ok(())
}

/// Summary of the cache at `path`.
pub fn describe(path: &Path) -> String {
    if !path.is_file() {
        return format!("Metadata cache: {} (not created yet)\n", path.display());
    }
    let cache = MetadataCache::open(path);
    let mut out = format!("Metadata cache: {}\n", path.display());
    out.push_str(&format!("  Packages: {}\n", cache.len()));
    out.push_str(&format!("  Size:     {}\n", format_size(file_size(path))));
    for (network, count) in cache.count_by_network() {
        out.push_str(&format!("  {network}: {count}\n"));
    }
    out
}

/// Delete the cache file.
pub fn clean(cache_file: Option<&Path>) -> miette::Result<()> {
    let path = resolve(cache_file)?;
    if !path.is_file() {
        println!("No metadata cache at {}", path.display());
        return Ok(());
    }
    let freed = MetadataCache::clear(&path)?;
    println!("Cleared metadata cache ({} freed)", format_size(freed));
    Ok(())
}
