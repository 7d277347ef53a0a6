//! Cache command implementation.

use miette::Result;

use crate::cli::CacheAction;

pub fn exec(action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Info { cache_file } => deptrace_ops::ops_cache::info(cache_file.as_deref()),
        CacheAction::Clean { cache_file } => deptrace_ops::ops_cache::clean(cache_file.as_deref()),
    }
}
