#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;

use m3u_tuner::{
    config::Config,
    device::{BaseUrlResolver, DeviceEmulator},
    observability::TunerMetrics,
    sources::{EmbeddedPlaylistSource, PlaylistSource},
    web::{AppState, router},
};

pub const BASE_URL: &str = "https://example.com";

pub const MIXED_PLAYLIST: &str = "#EXTM3U\n#EXTINF:-1 tvg-id=\"1\" tvg-name=\"A\" group-title=\"G\",Channel A\nhttp://x/a.mp4\n#EXTINF:-1,Channel B\nnot-a-url\n#EXTINF:-1,Channel C\nhttp://x/c.mp4";

/// Config pointing the resolver at [`BASE_URL`]
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.web.base_url = Some(BASE_URL.to_string());
    config
}

pub fn app_state(config: &Config, source: Arc<dyn PlaylistSource>) -> AppState {
    let resolver = BaseUrlResolver::new(config.web.base_url.clone(), None);
    let emulator = DeviceEmulator::new(config, source, resolver.resolve(), TunerMetrics::new());
    AppState::new(emulator, config.web.index_page)
}

pub fn test_server(config: &Config, source: Arc<dyn PlaylistSource>) -> TestServer {
    TestServer::new(router(app_state(config, source))).unwrap()
}

pub fn embedded(content: &'static str) -> Arc<dyn PlaylistSource> {
    Arc::new(EmbeddedPlaylistSource::new(content))
}

/// Serve `app` on an ephemeral loopback port and return its base URL
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
