//! Argument lists for ogr2ogr and topojson.

use std::ffi::OsString;
use std::path::Path;

use super::{Invocation, Tool};

/// Splits a bbox into the four `-clipsrc` values when it is four numbers
/// separated by whitespace or commas; anything else (WKT, a datasource path)
/// is passed through as a single argument.
pub fn clip_extent(bbox: &str) -> Vec<String> {
    let parts: Vec<&str> = bbox
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() == 4 && parts.iter().all(|p| p.parse::<f64>().is_ok()) {
        parts.into_iter().map(str::to_string).collect()
    } else {
        vec![bbox.trim().to_string()]
    }
}

/// `ogr2ogr -f GeoJSON -clipsrc <bbox> [-where <expr>] <output> <input>`
pub fn ogr2ogr(
    program: &str,
    bbox: &str,
    where_clause: Option<&str>,
    output: &Path,
    input: &Path,
) -> Invocation {
    let mut args: Vec<OsString> = vec!["-f".into(), "GeoJSON".into(), "-clipsrc".into()];
    args.extend(clip_extent(bbox).into_iter().map(OsString::from));
    if let Some(expr) = where_clause {
        args.push("-where".into());
        args.push(expr.into());
    }
    args.push(output.into());
    args.push(input.into());
    Invocation {
        tool: Tool::Ogr2ogr,
        program: program.to_string(),
        args,
    }
}

/// `topojson -o <output> [--id-property <p>] [-p <a,b>] -- <input>`
pub fn topojson(
    program: &str,
    output: &Path,
    id_property: Option<&str>,
    properties: Option<&[String]>,
    input: &Path,
) -> Invocation {
    let mut args: Vec<OsString> = vec!["-o".into(), output.into()];
    if let Some(id) = id_property {
        args.push("--id-property".into());
        args.push(id.into());
    }
    if let Some(props) = properties {
        args.push("-p".into());
        args.push(props.join(",").into());
    }
    args.push("--".into());
    args.push(input.into());
    Invocation {
        tool: Tool::Topojson,
        program: program.to_string(),
        args,
    }
}

/// `topojson -o <output> --bbox -p -- <inputs...>`: shared bbox, all properties kept.
pub fn merge<P: AsRef<Path>>(program: &str, output: &Path, inputs: &[P]) -> Invocation {
    let mut args: Vec<OsString> = vec![
        "-o".into(),
        output.into(),
        "--bbox".into(),
        "-p".into(),
        "--".into(),
    ];
    args.extend(inputs.iter().map(|p| p.as_ref().as_os_str().to_owned()));
    Invocation {
        tool: Tool::Topojson,
        program: program.to_string(),
        args,
    }
}
