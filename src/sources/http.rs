//! Remote playlist source over HTTP(S)

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::traits::PlaylistSource;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::models::{RawPlaylist, SourceKind};
use crate::utils::{DecompressionService, UrlUtils};

const USER_AGENT: &str = concat!("m3u-tuner/", env!("CARGO_PKG_VERSION"));

/// Fetches the playlist with a bounded request
///
/// Both the connect phase and the whole request are capped, so a hanging
/// upstream costs at most `timeout` per fetch. Dropping the fetch future
/// aborts the request.
pub struct HttpPlaylistSource {
    url: String,
    display_url: String,
    client: Client,
}

impl HttpPlaylistSource {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> AppResult<Self> {
        let url = url.into();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            display_url: UrlUtils::obfuscate_credentials(&url),
            url,
            client,
        })
    }
}

#[async_trait]
impl PlaylistSource for HttpPlaylistSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    fn describe(&self) -> String {
        format!("http {}", self.display_url)
    }

    async fn fetch(&self) -> SourceResult<RawPlaylist> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(&self.display_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: self.display_url.clone(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::from_reqwest(&self.display_url, e))?;
        debug!("Fetched {} bytes from {}", bytes.len(), self.display_url);

        let content = DecompressionService::decode_text(&bytes)?;
        Ok(RawPlaylist::new(
            SourceKind::Http,
            self.display_url.clone(),
            content,
        ))
    }
}
