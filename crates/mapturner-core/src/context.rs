//! Immutable per-run state handed to every pipeline stage.

use std::path::{Path, PathBuf};

use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::tools::{Invocation, ToolFailure, ToolRunner};

/// What to do when ogr2ogr or topojson exits unsuccessfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, record it in the report and keep going.
    #[default]
    Continue,
    /// Stop the run with `Error::ToolFailed`.
    Abort,
}

#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: MapConfig,
    /// Downloads, extraction directories and per-layer outputs.
    pub data_dir: PathBuf,
    /// Merged TopoJSON destination.
    pub output_path: PathBuf,
    pub policy: FailurePolicy,
}

impl RunContext {
    pub fn new(config: MapConfig, data_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            data_dir: data_dir.into(),
            output_path: output_path.into(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// `<data_dir>/<layer>.json`
    pub fn layer_output(&self, layer: &str) -> PathBuf {
        self.data_dir.join(format!("{layer}.json"))
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Runs one utility and applies the failure policy. Returns the recorded
    /// failure under `Continue`; a launch error is always fatal.
    pub(crate) fn run_tool<R: ToolRunner>(
        &self,
        runner: &R,
        invocation: &Invocation,
        layer: Option<&str>,
    ) -> Result<Option<ToolFailure>> {
        let output = runner.run(invocation).map_err(|source| Error::ToolLaunch {
            tool: invocation.program.clone(),
            source,
        })?;
        let stderr = output.stderr.trim();

        if output.success {
            if !stderr.is_empty() {
                tracing::info!("{}: {}", invocation.tool, stderr);
            }
            return Ok(None);
        }

        let failure = ToolFailure {
            tool: invocation.tool,
            layer: layer.map(str::to_string),
            code: output.code,
            stderr: stderr.to_string(),
        };
        tracing::warn!("{}", failure);
        if !stderr.is_empty() {
            tracing::warn!("{} stderr:\n{}", invocation.tool, stderr);
        }
        match self.policy {
            FailurePolicy::Continue => Ok(Some(failure)),
            FailurePolicy::Abort => Err(Error::ToolFailed(failure)),
        }
    }
}
