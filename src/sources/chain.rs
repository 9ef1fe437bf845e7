//! Ordered list of sources, first success wins

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::PlaylistSource;
use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::models::{RawPlaylist, SourceKind};

pub struct ChainPlaylistSource {
    sources: Vec<Arc<dyn PlaylistSource>>,
}

impl ChainPlaylistSource {
    pub fn new(sources: Vec<Arc<dyn PlaylistSource>>) -> AppResult<Self> {
        if sources.is_empty() {
            return Err(AppError::configuration(
                "chain source requires at least one child source",
            ));
        }
        Ok(Self { sources })
    }
}

#[async_trait]
impl PlaylistSource for ChainPlaylistSource {
    /// Kind of the preferred (first) child
    fn kind(&self) -> SourceKind {
        self.sources[0].kind()
    }

    fn describe(&self) -> String {
        let children: Vec<String> = self.sources.iter().map(|s| s.describe()).collect();
        format!("chain [{}]", children.join(", "))
    }

    async fn fetch(&self) -> SourceResult<RawPlaylist> {
        let mut last_error = None;

        for (position, source) in self.sources.iter().enumerate() {
            match source.fetch().await {
                Ok(playlist) => {
                    if position > 0 {
                        debug!("Chain satisfied by fallback source {}", source.describe());
                    }
                    return Ok(playlist);
                }
                Err(e) => {
                    debug!("Chain source {} failed: {}", source.describe(), e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            warn!(
                "All {} chained sources failed, last error: {}",
                self.sources.len(),
                e
            );
        }
        Err(SourceError::Exhausted {
            attempts: self.sources.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EmbeddedPlaylistSource, FilePlaylistSource};

    #[tokio::test]
    async fn test_first_success_wins() {
        let chain = ChainPlaylistSource::new(vec![
            Arc::new(FilePlaylistSource::new("/missing/one.m3u")),
            Arc::new(EmbeddedPlaylistSource::new("#EXTM3U\n# second\n")),
            Arc::new(EmbeddedPlaylistSource::new("#EXTM3U\n# third\n")),
        ])
        .unwrap();

        let playlist = chain.fetch().await.unwrap();
        assert_eq!(playlist.kind, SourceKind::Embedded);
        assert!(playlist.content.contains("second"));
        assert_eq!(chain.kind(), SourceKind::File);
    }

    #[tokio::test]
    async fn test_all_failing_is_exhausted() {
        let chain = ChainPlaylistSource::new(vec![
            Arc::new(FilePlaylistSource::new("/missing/one.m3u")),
            Arc::new(FilePlaylistSource::new("/missing/two.m3u")),
        ])
        .unwrap();

        let err = chain.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Exhausted { attempts: 2 }));
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(ChainPlaylistSource::new(Vec::new()).is_err());
    }
}
