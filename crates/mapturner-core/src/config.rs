//! Map configuration: bounding box plus an ordered table of layers.
//!
//! ```toml
//! bbox = "-180 -90 180 90"
//!
//! [layers.countries]
//! type = "shp"
//! path = "http://example.com/ne_10m_admin_0_countries.zip"
//! where = "pop > 1000"
//! id-property = "NAME"
//! properties = ["NAME", "POP_EST"]
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config is missing `bbox`")]
    MissingBbox,

    #[error("config declares no layers")]
    NoLayers,

    #[error("layer `{layer}` is missing required field `{field}`")]
    MissingField { layer: String, field: &'static str },

    #[error("unsupported layer type `{kind}` for layer `{layer}`")]
    UnsupportedType { layer: String, kind: String },

    #[error("invalid layer name `{layer}`; names become file names in the data directory")]
    InvalidLayerName { layer: String },
}

/// Source format of a layer; decides whether it goes through ogr2ogr first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Shapefile,
    Json,
    Csv,
}

impl LayerKind {
    /// Maps a config `type` tag to a kind. Tags are matched case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "shp" | "shapefile" => Some(LayerKind::Shapefile),
            "json" | "geojson" => Some(LayerKind::Json),
            "csv" => Some(LayerKind::Csv),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Shapefile => "shp",
            LayerKind::Json => "json",
            LayerKind::Csv => "csv",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One validated layer declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    /// Local path or URL, possibly pointing at a `.zip`.
    pub path: String,
    /// ogr2ogr attribute filter (shapefile layers only).
    pub where_clause: Option<String>,
    pub id_property: Option<String>,
    /// Properties to keep, in declared order.
    pub properties: Option<Vec<String>>,
}

/// Executable names for the external utilities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_ogr2ogr")]
    pub ogr2ogr: String,
    #[serde(default = "default_topojson")]
    pub topojson: String,
}

fn default_ogr2ogr() -> String {
    "ogr2ogr".to_string()
}

fn default_topojson() -> String {
    "topojson".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ogr2ogr: default_ogr2ogr(),
            topojson: default_topojson(),
        }
    }
}

/// Validated configuration, immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Clip extent handed to ogr2ogr `-clipsrc`.
    pub bbox: String,
    /// Working data directory, if the config names one.
    pub data_dir: Option<PathBuf>,
    pub tools: ToolsConfig,
    /// Layers in declaration order.
    pub layers: IndexMap<String, LayerSpec>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    bbox: Option<String>,
    data_dir: Option<PathBuf>,
    #[serde(default)]
    tools: ToolsConfig,
    #[serde(default)]
    layers: IndexMap<String, RawLayer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawLayer {
    #[serde(rename = "type")]
    kind: Option<String>,
    path: Option<String>,
    #[serde(rename = "where")]
    where_clause: Option<String>,
    id_property: Option<String>,
    properties: Option<Vec<String>>,
}

impl RawLayer {
    fn validate(self, name: &str) -> Result<LayerSpec, ConfigError> {
        if !is_valid_layer_name(name) {
            return Err(ConfigError::InvalidLayerName {
                layer: name.to_string(),
            });
        }
        let path = self
            .path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                layer: name.to_string(),
                field: "path",
            })?;
        let tag = self.kind.ok_or_else(|| ConfigError::MissingField {
            layer: name.to_string(),
            field: "type",
        })?;
        let kind = LayerKind::from_tag(&tag).ok_or_else(|| ConfigError::UnsupportedType {
            layer: name.to_string(),
            kind: tag.clone(),
        })?;
        let mut where_clause = self.where_clause;
        if where_clause.is_some() && kind != LayerKind::Shapefile {
            tracing::warn!("ignoring `where` on {} layer `{}`", kind, name);
            where_clause = None;
        }
        Ok(LayerSpec {
            kind,
            path,
            where_clause,
            id_property: self.id_property,
            properties: self.properties,
        })
    }
}

/// A layer name must be a single path component: not empty, not `.` or
/// `..`, no separators or control characters.
fn is_valid_layer_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

impl MapConfig {
    /// Parses and validates a config. Every layer is checked before returning,
    /// so one bad layer rejects the whole file.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(s)?;
        let bbox = raw
            .bbox
            .filter(|b| !b.trim().is_empty())
            .ok_or(ConfigError::MissingBbox)?;
        if raw.layers.is_empty() {
            return Err(ConfigError::NoLayers);
        }
        let mut layers = IndexMap::with_capacity(raw.layers.len());
        for (name, layer) in raw.layers {
            let spec = layer.validate(&name)?;
            layers.insert(name, spec);
        }
        Ok(Self {
            bbox,
            data_dir: raw.data_dir,
            tools: raw.tools,
            layers,
        })
    }
}

/// Load a config file. A relative `data_dir` is taken relative to the
/// directory holding the config file.
pub fn load(path: &Path) -> Result<MapConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut cfg = MapConfig::from_toml_str(&data)?;
    if let Some(dir) = cfg.data_dir.take() {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        cfg.data_dir = Some(if dir.is_relative() { base.join(dir) } else { dir });
    }
    tracing::debug!(
        "loaded config {} with {} layer(s)",
        path.display(),
        cfg.layers.len()
    );
    Ok(cfg)
}

/// Default working data directory: `~/.cache/mapturner`.
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mapturner")?;
    Ok(xdg_dirs.get_cache_home().join("mapturner"))
}
