//! Integration test: local HTTP server, curl-backed downloads and the
//! download/extract cache.

mod common;

use mapturner_core::source::{staging_path, CurlFetcher, Fetcher, SourceResolver};
use mapturner_core::Error;
use std::io::Write;
use tempfile::tempdir;

fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let opts = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, data) in members {
            zip.start_file(*name, opts).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    buf.into_inner()
}

#[test]
fn curl_fetcher_writes_body() {
    let body: Vec<u8> = (0u8..=255).cycle().take(200 * 1024).collect();
    let server = common::file_server::start(&[("geo/big.json", body.clone())]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("big.json");

    let written = CurlFetcher::default()
        .fetch(&server.url("geo/big.json"), &dest)
        .expect("fetch");
    assert_eq!(written, body.len() as u64);
    assert_eq!(std::fs::read(&dest).unwrap(), body);
    assert!(!staging_path(&dest).exists());
}

#[test]
fn curl_fetcher_http_error_leaves_nothing() {
    let server = common::file_server::start(&[]);
    let dir = tempdir().unwrap();
    let dest = dir.path().join("missing.zip");

    let err = CurlFetcher::default()
        .fetch(&server.url("missing.zip"), &dest)
        .unwrap_err();
    assert!(err.to_string().contains("404"), "unexpected error: {err:#}");
    assert!(!dest.exists());
    assert!(!staging_path(&dest).exists());
}

#[test]
fn remote_archive_is_downloaded_and_extracted_once() {
    let archive = zip_bytes(&[("roads.shp", b"shp"), ("roads.prj", b"prj")]);
    let server = common::file_server::start(&[("ne/roads.zip", archive)]);
    let dir = tempdir().unwrap();
    let resolver = SourceResolver::with_curl(dir.path());
    let url = server.url("ne/roads.zip");

    let first = resolver.resolve(&url).unwrap();
    assert_eq!(first, dir.path().join("roads"));
    assert_eq!(std::fs::read(first.join("roads.shp")).unwrap(), b"shp");
    assert_eq!(server.hits(), 1);

    let second = resolver.resolve(&url).unwrap();
    assert_eq!(second, first);
    assert_eq!(server.hits(), 1);
}

#[test]
fn remote_404_is_download_error() {
    let server = common::file_server::start(&[]);
    let dir = tempdir().unwrap();
    let resolver = SourceResolver::with_curl(dir.path());
    let url = server.url("nope.json");

    match resolver.resolve(&url) {
        Err(Error::Download { url: failed, .. }) => assert_eq!(failed, url),
        other => panic!("expected Download error, got {:?}", other),
    }
    assert!(!dir.path().join("nope.json").exists());
}
