//! Resolving declared layer paths to local files.
//!
//! A declared path is either a URL (downloaded once into the data directory,
//! named after the last URL path segment) or a local path (must exist). If
//! the resulting file is a `.zip`, it is extracted once into a directory of
//! the same stem inside the data directory, and that directory is the
//! resolved path.
//!
//! The cache is existence-based and best-effort: a file or directory that
//! already exists is reused without any freshness check. Downloads and
//! extractions are staged under a `.part` name so an interrupted run does not
//! leave behind something a later run would mistake for a cache hit.

mod archive;
mod fetch;
mod filename;

pub use archive::{extract_all, is_archive};
pub use fetch::{CurlFetcher, Fetcher};
pub use filename::{filename_from_url, is_remote};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix for in-progress downloads and extractions.
pub const STAGING_SUFFIX: &str = ".part";

/// Path used while a download or extraction is in progress
/// (e.g. `roads.zip` → `roads.zip.part`).
pub fn staging_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(STAGING_SUFFIX);
    PathBuf::from(o)
}

/// How a declared path was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
}

impl SourceKind {
    pub fn of(declared: &str) -> Self {
        if is_remote(declared) {
            SourceKind::Remote
        } else {
            SourceKind::Local
        }
    }
}

/// Turns declared layer paths into local paths, downloading and extracting
/// into `data_dir` as needed.
#[derive(Debug)]
pub struct SourceResolver<F = CurlFetcher> {
    data_dir: PathBuf,
    fetcher: F,
}

impl SourceResolver<CurlFetcher> {
    pub fn with_curl(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, CurlFetcher::default())
    }
}

impl<F: Fetcher> SourceResolver<F> {
    pub fn new(data_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            data_dir: data_dir.into(),
            fetcher,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve a declared path: the extraction directory for archives,
    /// otherwise the downloaded or local file.
    pub fn resolve(&self, declared: &str) -> Result<PathBuf> {
        let local = match SourceKind::of(declared) {
            SourceKind::Remote => self.download_cached(declared)?,
            SourceKind::Local => {
                let path = PathBuf::from(declared);
                if !path.exists() {
                    return Err(Error::MissingSource { path });
                }
                path
            }
        };

        if !is_archive(&local) {
            return Ok(local);
        }
        self.extract_cached(&local)
    }

    /// Cache location for a URL inside the data directory.
    pub fn cache_path(&self, url: &str) -> Result<PathBuf> {
        let filename = filename_from_url(url).ok_or_else(|| Error::UnnamedSource {
            url: url.to_string(),
        })?;
        Ok(self.data_dir.join(filename))
    }

    /// Extraction directory for an archive inside the data directory.
    pub fn extraction_dir(&self, archive: &Path) -> Result<PathBuf> {
        let stem = archive.file_stem().ok_or_else(|| Error::MissingSource {
            path: archive.to_path_buf(),
        })?;
        Ok(self.data_dir.join(stem))
    }

    fn download_cached(&self, url: &str) -> Result<PathBuf> {
        let dest = self.cache_path(url)?;
        if dest.exists() {
            tracing::debug!("using cached {}", dest.display());
            return Ok(dest);
        }

        fs::create_dir_all(&self.data_dir).map_err(|e| Error::io(&self.data_dir, e))?;
        tracing::info!("downloading {}", url);
        let bytes = self
            .fetcher
            .fetch(url, &dest)
            .map_err(|source| Error::Download {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!("downloaded {} bytes to {}", bytes, dest.display());
        Ok(dest)
    }

    fn extract_cached(&self, archive: &Path) -> Result<PathBuf> {
        let dir = self.extraction_dir(archive)?;
        if dir.exists() {
            tracing::debug!("using extracted {}", dir.display());
            return Ok(dir);
        }

        fs::create_dir_all(&self.data_dir).map_err(|e| Error::io(&self.data_dir, e))?;
        tracing::info!("unzipping {}", archive.display());
        let members = extract_all(archive, &dir)?;
        tracing::debug!("extracted {} member(s) into {}", members, dir.display());
        Ok(dir)
    }
}
