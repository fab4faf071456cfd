//! Final topojson pass combining every layer into one file.

use std::fs;
use std::path::PathBuf;

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::tools::{self, ToolFailure, ToolRunner};

/// Merge per-layer outputs (in the given order) into `ctx.output_path`.
pub fn merge_layers<R: ToolRunner>(
    ctx: &RunContext,
    runner: &R,
    inputs: &[PathBuf],
) -> Result<Option<ToolFailure>> {
    if let Some(parent) = ctx.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    tracing::info!(
        "merging {} layer(s) into {}",
        inputs.len(),
        ctx.output_path.display()
    );
    let invocation = tools::merge(&ctx.config.tools.topojson, &ctx.output_path, inputs);
    ctx.run_tool(runner, &invocation, None)
}
