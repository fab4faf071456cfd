//! Error types for the layer pipeline.
//!
//! Everything here is fatal for a run. A non-zero exit from an external
//! utility is not an `Error`; it is recorded as a [`ToolFailure`](crate::tools::ToolFailure)
//! and only becomes `Error::ToolFailed` under `FailurePolicy::Abort`.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::tools::ToolFailure;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local source path does not exist.
    #[error("{} does not exist", path.display())]
    MissingSource { path: PathBuf },

    /// Remote URL has no final path segment to name the cache file after.
    #[error("cannot derive a cache filename from {url}")]
    UnnamedSource { url: String },

    /// The layer's intermediate output would overwrite its own source file.
    #[error("layer `{layer}` would overwrite its source {}; rename the layer", path.display())]
    OutputIsSource { layer: String, path: PathBuf },

    #[error("download of {url} failed")]
    Download {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot extract {}", archive.display())]
    Extract {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The utility could not be started at all (not installed, not executable).
    #[error("cannot launch {tool}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    ToolFailed(ToolFailure),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
