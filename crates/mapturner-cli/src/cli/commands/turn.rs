//! `mapturner turn <config> <output>` – run the layer pipeline.

use anyhow::{Context, Result};
use mapturner_core::config;
use mapturner_core::{FailurePolicy, Pipeline, RunContext, RunReport};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TurnOptions {
    pub config: PathBuf,
    pub output_path: PathBuf,
    pub data_dir: Option<PathBuf>,
    pub fail_fast: bool,
}

impl TurnOptions {
    fn policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        }
    }
}

/// Data directory precedence: `--data-dir`, then the config's `data_dir`,
/// then `~/.cache/mapturner`.
pub(crate) fn choose_data_dir(cli: Option<&Path>, from_config: Option<&Path>) -> Result<PathBuf> {
    match cli.or(from_config) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => config::default_data_dir().context("cannot locate cache directory"),
    }
}

pub fn run_turn(opts: &TurnOptions) -> Result<()> {
    let cfg = config::load(&opts.config)?;
    let data_dir = choose_data_dir(opts.data_dir.as_deref(), cfg.data_dir.as_deref())?;
    tracing::debug!("data dir {}", data_dir.display());

    let ctx = RunContext::new(cfg, data_dir, &opts.output_path).with_policy(opts.policy());
    let pipeline = Pipeline::new(ctx);
    tracing::info!("building {}", pipeline.context().output_path().display());
    let report = pipeline.run()?;

    for line in summary_lines(&report) {
        println!("{}", line);
    }
    for failure in report.failures() {
        eprintln!("  {}", failure);
    }
    ensure_clean(&report)
}

/// One line per layer (name, status, per-layer output), then the output path.
pub(crate) fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .layers
        .iter()
        .map(|layer| {
            let status = if layer.failures.is_empty() { "ok" } else { "FAILED" };
            format!("{:<24} {:<6} {}", layer.name, status, layer.output.display())
        })
        .collect();
    lines.push(format!("Wrote {}", report.output.display()));
    lines
}

/// A run that finished with utility failures still exits non-zero.
pub(crate) fn ensure_clean(report: &RunReport) -> Result<()> {
    let failures = report.failures().count();
    if failures > 0 {
        anyhow::bail!(
            "{} external utility failure(s); {} may be incomplete",
            failures,
            report.output.display()
        );
    }
    Ok(())
}
