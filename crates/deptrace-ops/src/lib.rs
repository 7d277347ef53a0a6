pub mod ops_cache;
pub mod ops_trace;
pub mod output;

use std::path::{Path, PathBuf};

use deptrace_core::config::CacheConfig;

/// The metadata cache file to use, or `None` when caching is disabled.
///
/// An explicit `--cache-file` wins over `[cache] file`; `--no-cache` and
/// `[cache] enabled = false` both disable the cache.
pub fn cache_path(explicit: Option<&Path>, no_cache: bool, config: &CacheConfig) -> Option<PathBuf> {
    if no_cache || (!config.enabled && explicit.is_none()) {
        return None;
    }
    Some(
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&config.file)),
    )
}
