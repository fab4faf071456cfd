//! Zip extraction into the data directory.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use super::staging_path;
use crate::error::{Error, Result};

/// True if the file name ends in `.zip` (any case).
pub fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Extracts every member of `archive` into `dest_dir`.
///
/// Members are unpacked into `<dest_dir>.part` and the directory is renamed
/// into place once extraction finishes. Returns the number of members.
pub fn extract_all(archive: &Path, dest_dir: &Path) -> Result<usize> {
    let staging = staging_path(dest_dir);
    if staging.exists() {
        fs::remove_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;
    }

    let file = File::open(archive).map_err(|e| Error::io(archive, e))?;
    let extract_err = |source| Error::Extract {
        archive: archive.to_path_buf(),
        source,
    };
    let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(extract_err)?;
    let members = zip.len();

    if let Err(source) = zip.extract(&staging) {
        let _ = fs::remove_dir_all(&staging);
        return Err(extract_err(source));
    }
    fs::rename(&staging, dest_dir).map_err(|e| Error::io(dest_dir, e))?;
    Ok(members)
}
