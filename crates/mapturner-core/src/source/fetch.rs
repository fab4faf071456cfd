//! Streamed HTTP GET of remote sources into the data directory.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use super::staging_path;

/// Downloads a URL to a local file. Implementations must either leave a
/// complete file at `dest` or no file at all.
pub trait Fetcher {
    /// Returns the number of bytes written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// libcurl-backed fetcher: single GET, redirects followed, no retry or resume.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    pub connect_timeout: Duration,
    /// Abort when the transfer stays below 1 KiB/s for this long.
    pub low_speed_time: Duration,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_time: Duration::from_secs(60),
        }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = staging_path(dest);
        let result = self.fetch_into(url, &part);
        match result {
            Ok(written) => {
                fs::rename(&part, dest)
                    .with_context(|| format!("rename {} to {}", part.display(), dest.display()))?;
                Ok(written)
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                Err(e)
            }
        }
    }
}

impl CurlFetcher {
    fn fetch_into(&self, url: &str, part: &Path) -> Result<u64> {
        let mut file = File::create(part).with_context(|| format!("create {}", part.display()))?;
        let mut written: u64 = 0;
        let mut write_err: Option<std::io::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(self.low_speed_time)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = write_err {
            return Err(e).with_context(|| format!("write {}", part.display()));
        }
        performed.context("GET request failed")?;

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }

        file.sync_all()
            .with_context(|| format!("sync {}", part.display()))?;
        Ok(written)
    }
}
