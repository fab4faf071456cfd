//! `mapturner check <config>` – validate a config without running anything heavy.

use anyhow::Result;
use mapturner_core::config::{self, LayerKind, MapConfig};
use mapturner_core::source::SourceKind;
use mapturner_core::tools::ProcessRunner;
use std::path::Path;

/// One line per layer: name, type, where the source comes from, declared path.
pub(crate) fn plan_lines(cfg: &MapConfig) -> Vec<String> {
    cfg.layers
        .iter()
        .map(|(name, spec)| {
            let origin = match SourceKind::of(&spec.path) {
                SourceKind::Remote => "remote",
                SourceKind::Local if Path::new(&spec.path).exists() => "local",
                SourceKind::Local => "missing",
            };
            format!("{:<24} {:<4} {:<8} {}", name, spec.kind, origin, spec.path)
        })
        .collect()
}

/// Utilities this config needs; ogr2ogr only when a shapefile layer exists.
pub(crate) fn required_tools(cfg: &MapConfig) -> Vec<&str> {
    let mut tools = Vec::with_capacity(2);
    if cfg.layers.values().any(|l| l.kind == LayerKind::Shapefile) {
        tools.push(cfg.tools.ogr2ogr.as_str());
    }
    tools.push(cfg.tools.topojson.as_str());
    tools
}

pub fn run_check(config_path: &Path) -> Result<()> {
    let cfg = config::load(config_path)?;
    println!("bbox: {}", cfg.bbox);
    for line in plan_lines(&cfg) {
        println!("{}", line);
    }

    let missing: Vec<&str> = required_tools(&cfg)
        .into_iter()
        .filter(|tool| {
            let found = ProcessRunner::probe(tool);
            println!("{:<24} {}", tool, if found { "found" } else { "NOT FOUND" });
            !found
        })
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("cannot launch: {}", missing.join(", "));
    }
    Ok(())
}
