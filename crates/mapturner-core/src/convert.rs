//! Per-layer conversion: ogr2ogr for shapefiles, then topojson for every layer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{LayerKind, LayerSpec};
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::tools::{self, ToolFailure, ToolRunner};

/// Result of converting one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutcome {
    pub name: String,
    /// Per-layer TopoJSON file fed to the merge.
    pub output: PathBuf,
    /// Utilities that exited unsuccessfully while producing `output`.
    pub failures: Vec<ToolFailure>,
}

/// Convert one layer whose source has been resolved to `input`.
pub fn convert_layer<R: ToolRunner>(
    ctx: &RunContext,
    runner: &R,
    name: &str,
    spec: &LayerSpec,
    input: &Path,
) -> Result<LayerOutcome> {
    let output = ctx.layer_output(name);
    ensure_output_is_not_source(name, input, &output)?;
    let mut failures = Vec::new();

    let topo_input = match spec.kind {
        LayerKind::Shapefile => {
            failures.extend(run_ogr2ogr(ctx, runner, name, spec, input, &output)?);
            output.clone()
        }
        LayerKind::Json | LayerKind::Csv => input.to_path_buf(),
    };

    let invocation = tools::topojson(
        &ctx.config.tools.topojson,
        &output,
        spec.id_property.as_deref(),
        spec.properties.as_deref(),
        &topo_input,
    );
    failures.extend(ctx.run_tool(runner, &invocation, Some(name))?);

    Ok(LayerOutcome {
        name: name.to_string(),
        output,
        failures,
    })
}

/// Fails when `<data_dir>/<name>.json` is the resolved source itself, as
/// with a layer `borders` downloaded from `.../borders.json`. Encoding would
/// replace the cached download with TopoJSON.
pub(crate) fn ensure_output_is_not_source(name: &str, input: &Path, output: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(Error::OutputIsSource {
            layer: name.to_string(),
            path: input.to_path_buf(),
        });
    }
    Ok(())
}

fn run_ogr2ogr<R: ToolRunner>(
    ctx: &RunContext,
    runner: &R,
    name: &str,
    spec: &LayerSpec,
    input: &Path,
    output: &Path,
) -> Result<Option<ToolFailure>> {
    // ogr2ogr refuses to overwrite an existing GeoJSON file.
    if output.exists() {
        fs::remove_file(output).map_err(|e| Error::io(output, e))?;
    }
    let invocation = tools::ogr2ogr(
        &ctx.config.tools.ogr2ogr,
        &ctx.config.bbox,
        spec.where_clause.as_deref(),
        output,
        input,
    );
    ctx.run_tool(runner, &invocation, Some(name))
}
