//! Remote and local playlist sources against real I/O

mod common;

use axum::{Router, http::StatusCode, routing::get};
use flate2::{Compression, write::GzEncoder};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

use common::*;
use m3u_tuner::{
    config::{SourceConfig, SourceSpec},
    errors::SourceError,
    m3u::M3uParser,
    models::SourceKind,
    sources::{FilePlaylistSource, HttpPlaylistSource, PlaylistSource, PlaylistSourceFactory},
};

fn http_source(url: String, timeout: Duration) -> HttpPlaylistSource {
    HttpPlaylistSource::new(url, timeout, Duration::from_secs(1)).unwrap()
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_http_source_fetches_playlist() {
    let upstream = spawn_upstream(Router::new().route("/list.m3u", get(|| async { MIXED_PLAYLIST }))).await;
    let source = http_source(format!("{upstream}/list.m3u"), Duration::from_secs(2));

    let playlist = source.fetch().await.unwrap();

    assert_eq!(playlist.kind, SourceKind::Http);
    assert_eq!(M3uParser::parse(&playlist.content).len(), 2);
}

#[tokio::test]
async fn test_http_source_decompresses_gzip_body() {
    let body = gzip(MIXED_PLAYLIST);
    let upstream = spawn_upstream(Router::new().route(
        "/list.m3u.gz",
        get(move || {
            let body = body.clone();
            async move { body }
        }),
    ))
    .await;
    let source = http_source(format!("{upstream}/list.m3u.gz"), Duration::from_secs(2));

    let playlist = source.fetch().await.unwrap();

    assert_eq!(playlist.content, MIXED_PLAYLIST);
}

#[tokio::test]
async fn test_http_source_non_success_status() {
    let upstream = spawn_upstream(Router::new().route(
        "/gone.m3u",
        get(|| async { (StatusCode::GONE, "gone") }),
    ))
    .await;
    let source = http_source(format!("{upstream}/gone.m3u"), Duration::from_secs(2));

    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, SourceError::Http { status: 410, .. }));
}

#[tokio::test]
async fn test_http_source_times_out() {
    let upstream = spawn_upstream(Router::new().route(
        "/slow.m3u",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "#EXTM3U\n"
        }),
    ))
    .await;
    let source = http_source(format!("{upstream}/slow.m3u"), Duration::from_millis(200));

    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, SourceError::Timeout { .. }));
}

#[tokio::test]
async fn test_file_source_reads_gzip_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&gzip(MIXED_PLAYLIST)).unwrap();

    let playlist = FilePlaylistSource::new(file.path()).fetch().await.unwrap();

    assert_eq!(playlist.content, MIXED_PLAYLIST);
}

#[tokio::test]
async fn test_chain_falls_back_to_remote() {
    let upstream = spawn_upstream(Router::new().route("/list.m3u", get(|| async { MIXED_PLAYLIST }))).await;
    let config = SourceConfig {
        spec: SourceSpec::Chain {
            sources: vec![
                SourceSpec::File {
                    path: "/missing/local.m3u".into(),
                },
                SourceSpec::http(format!("{upstream}/list.m3u")),
            ],
        },
        cache_ttl: Duration::ZERO,
    };

    let source: Arc<dyn PlaylistSource> = PlaylistSourceFactory::from_config(&config).unwrap();
    let playlist = source.fetch().await.unwrap();

    assert_eq!(source.kind(), SourceKind::File);
    assert_eq!(playlist.kind, SourceKind::Http);
}
