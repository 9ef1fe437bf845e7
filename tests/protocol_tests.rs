//! Tuner protocol routes driven through the full router

mod common;

use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    routing::get,
};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use common::*;
use m3u_tuner::{
    lineup::{LineupEntry, UrlMode},
    sources::{FilePlaylistSource, HttpPlaylistSource, PlaylistSource},
    web::responses::FALLBACK_HEADER,
};

#[tokio::test]
async fn test_discover_reports_configured_base_url() {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    let response = server.get("/discover.json").await;
    response.assert_status_ok();
    let body: Value = response.json();

    assert_eq!(body["BaseURL"], "https://example.com");
    assert_eq!(body["LineupURL"], "https://example.com/lineup.json");
    for key in [
        "FriendlyName",
        "Manufacturer",
        "ModelNumber",
        "FirmwareName",
        "FirmwareVersion",
        "DeviceID",
        "DeviceAuth",
    ] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}

#[tokio::test]
async fn test_lineup_skips_malformed_entries() {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    let response = server.get("/lineup.json").await;
    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
    assert!(response.headers().get(FALLBACK_HEADER).is_none());

    let body: Value = response.json();
    assert_eq!(
        body,
        json!([
            {"GuideNumber": "1", "GuideName": "Channel A", "URL": "http://x/a.mp4"},
            {"GuideNumber": "2", "GuideName": "Channel C", "URL": "http://x/c.mp4"}
        ])
    );
}

#[tokio::test]
async fn test_lineup_status_is_static() {
    let server = test_server(&test_config(), Arc::new(FilePlaylistSource::new("/missing.m3u")));

    let response = server.get("/lineup_status.json").await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "ScanInProgress": 0,
        "ScanPossible": 1,
        "Source": "Cable",
        "SourceList": ["Cable"],
        "Tuners": 2
    }));
}

#[rstest]
#[case("/auto/v1", "http://x/a.mp4")]
#[case("/auto/v2", "http://x/c.mp4")]
#[tokio::test]
async fn test_auto_redirects_to_stream(#[case] path: &str, #[case] location: &str) {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    let response = server.get(path).await;
    response.assert_status(StatusCode::FOUND);
    assert_eq!(response.header("location"), location);
}

#[rstest]
#[case("/auto/v0")]
#[case("/auto/v3")]
#[case("/auto/v")]
#[case("/auto/vx")]
#[case("/auto/12")]
#[case("/auto")]
#[case("/auto/v1/extra")]
#[case("/nope.json")]
#[tokio::test]
async fn test_unknown_paths_are_not_found(#[case] path: &str) {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    server.get(path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_auto_with_failing_source_is_not_found() {
    let server = test_server(&test_config(), Arc::new(FilePlaylistSource::new("/missing.m3u")));

    server.get("/auto/v1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    let response = server
        .get("/lineup.json")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("http://dvr.local:32400"),
        )
        .await;

    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_indirect_lineup_round_trip() {
    let mut config = test_config();
    config.lineup.url_mode = UrlMode::Indirect;
    let server = test_server(&config, embedded(MIXED_PLAYLIST));

    let entries: Vec<LineupEntry> = server.get("/lineup.json").await.json();
    assert_eq!(entries.len(), 2);

    for (entry, upstream) in entries.iter().zip(["http://x/a.mp4", "http://x/c.mp4"]) {
        let path = entry
            .url
            .strip_prefix(BASE_URL)
            .expect("indirect URL should point back at the tuner");
        assert_eq!(path, format!("/auto/v{}", entry.guide_number));

        let response = server.get(path).await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), upstream);
    }
}

#[tokio::test]
async fn test_hd_flag_in_lineup() {
    let mut config = test_config();
    config.lineup.hd_flag = true;
    let server = test_server(&config, embedded(MIXED_PLAYLIST));

    let body: Value = server.get("/lineup.json").await.json();
    assert_eq!(body[0]["HD"], 1);
}

#[tokio::test]
async fn test_fallback_lineup_on_upstream_timeout() {
    let upstream = spawn_upstream(Router::new().route(
        "/slow.m3u",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "#EXTM3U\n"
        }),
    ))
    .await;
    let source: Arc<dyn PlaylistSource> = Arc::new(
        HttpPlaylistSource::new(
            format!("{upstream}/slow.m3u"),
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
        .unwrap(),
    );
    let config = test_config();
    let server = test_server(&config, source);

    let response = server.get("/lineup.json").await;

    response.assert_status_ok();
    assert_eq!(response.header("x-tuner-fallback"), "true");
    let entries: Vec<LineupEntry> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].guide_number, "1");
    assert_eq!(entries[0].guide_name, config.fallback.guide_name);
    assert_eq!(entries[0].url, config.fallback.stream_url);
}

#[tokio::test]
async fn test_disabled_fallback_is_service_unavailable() {
    let mut config = test_config();
    config.fallback.enabled = false;
    let server = test_server(&config, Arc::new(FilePlaylistSource::new("/missing.m3u")));

    let response = server.get("/lineup.json").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_index_page() {
    let server = test_server(&test_config(), embedded(MIXED_PLAYLIST));

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("https://example.com/lineup.json"));
    assert!(html.contains("direct"));
}

#[tokio::test]
async fn test_index_page_disabled() {
    let mut config = test_config();
    config.web.index_page = false;
    let server = test_server(&config, embedded(MIXED_PLAYLIST));

    server.get("/").await.assert_status_not_found();
}
