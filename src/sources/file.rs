//! Local playlist file source

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use super::traits::PlaylistSource;
use crate::errors::{SourceError, SourceResult};
use crate::models::{RawPlaylist, SourceKind};
use crate::utils::DecompressionService;

/// Reads the playlist from disk on every fetch
pub struct FilePlaylistSource {
    path: PathBuf,
}

impl FilePlaylistSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PlaylistSource for FilePlaylistSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> SourceResult<RawPlaylist> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());

        let content = DecompressionService::decode_text(&bytes)?;
        Ok(RawPlaylist::new(
            SourceKind::File,
            self.path.display().to_string(),
            content,
        ))
    }
}
