//! Playlist source factory
//!
//! Builds the configured source tree once at startup. The web layer only sees
//! the resulting `Arc<dyn PlaylistSource>`.

use std::sync::Arc;
use tracing::info;

use super::cached::CachedPlaylistSource;
use super::chain::ChainPlaylistSource;
use super::embedded::EmbeddedPlaylistSource;
use super::file::FilePlaylistSource;
use super::http::HttpPlaylistSource;
use super::traits::PlaylistSource;
use crate::config::{SourceConfig, SourceSpec};
use crate::errors::AppResult;

pub struct PlaylistSourceFactory;

impl PlaylistSourceFactory {
    /// Build the configured source, wrapped in a cache when `cache_ttl` is set
    pub fn from_config(config: &SourceConfig) -> AppResult<Arc<dyn PlaylistSource>> {
        let source = Self::create(&config.spec)?;

        let source: Arc<dyn PlaylistSource> = if config.cache_ttl.is_zero() {
            source
        } else {
            Arc::new(CachedPlaylistSource::new(source, config.cache_ttl))
        };

        info!("Playlist source: {}", source.describe());
        Ok(source)
    }

    pub fn create(spec: &SourceSpec) -> AppResult<Arc<dyn PlaylistSource>> {
        match spec {
            SourceSpec::File { path } => Ok(Arc::new(FilePlaylistSource::new(path.clone()))),
            SourceSpec::Http {
                url,
                timeout,
                connect_timeout,
            } => Ok(Arc::new(HttpPlaylistSource::new(
                url.clone(),
                *timeout,
                *connect_timeout,
            )?)),
            SourceSpec::Embedded { content: None } => Ok(Arc::new(EmbeddedPlaylistSource::sample())),
            SourceSpec::Embedded {
                content: Some(content),
            } => Ok(Arc::new(EmbeddedPlaylistSource::new(content.clone()))),
            SourceSpec::Chain { sources } => {
                let children = sources
                    .iter()
                    .map(Self::create)
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Arc::new(ChainPlaylistSource::new(children)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;
    use std::time::Duration;

    #[test]
    fn test_default_config_is_embedded_sample() {
        let source = PlaylistSourceFactory::from_config(&SourceConfig::default()).unwrap();
        assert_eq!(source.kind(), SourceKind::Embedded);
        assert!(!source.describe().contains("cached"));
    }

    #[test]
    fn test_cache_ttl_wraps_source() {
        let config = SourceConfig {
            spec: SourceSpec::File {
                path: "playlist.m3u".into(),
            },
            cache_ttl: Duration::from_secs(30),
        };

        let source = PlaylistSourceFactory::from_config(&config).unwrap();
        assert_eq!(source.kind(), SourceKind::File);
        assert!(source.describe().contains("cached 30s"));
    }

    #[test]
    fn test_chain_of_http_and_embedded() {
        let spec = SourceSpec::Chain {
            sources: vec![
                SourceSpec::http("http://example.com/list.m3u"),
                SourceSpec::Embedded { content: None },
            ],
        };

        let source = PlaylistSourceFactory::create(&spec).unwrap();
        assert_eq!(source.kind(), SourceKind::Http);
        assert!(source.describe().starts_with("chain ["));
    }
}
