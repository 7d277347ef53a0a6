//! Handler for `deptrace trace`.

use miette::Result;

use deptrace_ops::ops_trace::{self, TraceOptions};

pub async fn exec(opts: &TraceOptions) -> Result<()> {
    ops_trace::trace(opts).await
}
