//! Playlist compiled into the binary or supplied inline in the config

use async_trait::async_trait;
use std::borrow::Cow;

use super::traits::PlaylistSource;
use crate::errors::SourceResult;
use crate::models::{RawPlaylist, SourceKind};

/// Built-in sample playlist served when nothing else is configured
pub const SAMPLE_PLAYLIST: &str = include_str!("sample_playlist.m3u");

pub struct EmbeddedPlaylistSource {
    content: Cow<'static, str>,
}

impl EmbeddedPlaylistSource {
    pub fn new(content: impl Into<Cow<'static, str>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_PLAYLIST)
    }
}

impl Default for EmbeddedPlaylistSource {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl PlaylistSource for EmbeddedPlaylistSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Embedded
    }

    fn describe(&self) -> String {
        format!("embedded ({} bytes)", self.content.len())
    }

    async fn fetch(&self) -> SourceResult<RawPlaylist> {
        Ok(RawPlaylist::new(
            SourceKind::Embedded,
            "embedded",
            &*self.content,
        ))
    }
}
