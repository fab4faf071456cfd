//! The layer pipeline. Sources for all layers are resolved first, then each
//! layer is converted in declaration order, then everything is merged.

mod report;

pub use report::RunReport;

use std::fs;

use crate::context::RunContext;
use crate::convert::{self, LayerOutcome};
use crate::error::{Error, Result};
use crate::merge;
use crate::source::{CurlFetcher, Fetcher, SourceResolver};
use crate::tools::{ProcessRunner, ToolRunner};

pub struct Pipeline<R = ProcessRunner, F = CurlFetcher> {
    ctx: RunContext,
    resolver: SourceResolver<F>,
    runner: R,
}

impl Pipeline<ProcessRunner, CurlFetcher> {
    /// Pipeline with real subprocesses and libcurl downloads.
    pub fn new(ctx: RunContext) -> Self {
        Self::with_parts(ctx, ProcessRunner, CurlFetcher::default())
    }
}

impl<R: ToolRunner, F: Fetcher> Pipeline<R, F> {
    pub fn with_parts(ctx: RunContext, runner: R, fetcher: F) -> Self {
        let resolver = SourceResolver::new(ctx.data_dir.clone(), fetcher);
        Self {
            ctx,
            resolver,
            runner,
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn resolver(&self) -> &SourceResolver<F> {
        &self.resolver
    }

    /// Process every layer, then merge. Stops at the first fatal error; tool
    /// failures are handled per `ctx.policy`.
    pub fn run(&self) -> Result<RunReport> {
        fs::create_dir_all(&self.ctx.data_dir).map_err(|e| Error::io(&self.ctx.data_dir, e))?;

        // Every source must be available before any utility runs.
        let mut inputs = Vec::with_capacity(self.ctx.config.layers.len());
        for (name, spec) in &self.ctx.config.layers {
            tracing::debug!("resolving {} from {}", name, spec.path);
            let input = self.resolver.resolve(&spec.path)?;
            convert::ensure_output_is_not_source(name, &input, &self.ctx.layer_output(name))?;
            inputs.push(input);
        }

        let mut layers: Vec<LayerOutcome> = Vec::with_capacity(inputs.len());
        for ((name, spec), input) in self.ctx.config.layers.iter().zip(&inputs) {
            tracing::info!("processing {} ({})", name, spec.kind);
            let outcome = convert::convert_layer(&self.ctx, &self.runner, name, spec, input)?;
            layers.push(outcome);
        }

        let outputs: Vec<_> = layers.iter().map(|l| l.output.clone()).collect();
        let merge_failure = merge::merge_layers(&self.ctx, &self.runner, &outputs)?;

        Ok(RunReport {
            layers,
            merge_failure,
            output: self.ctx.output_path.clone(),
        })
    }
}
