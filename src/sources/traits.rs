//! Playlist source trait definition
//!
//! The web layer only ever needs one capability from a source: produce raw
//! M3U text or fail. Adapters for concrete origins live next to this trait.

use async_trait::async_trait;

use crate::errors::SourceResult;
use crate::models::{RawPlaylist, SourceKind};

/// Something that can produce raw M3U text
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Origin of the content this source ultimately serves
    fn kind(&self) -> SourceKind;

    /// Human readable description for logs; never contains credentials
    fn describe(&self) -> String;

    /// Fetch a fresh copy of the playlist
    async fn fetch(&self) -> SourceResult<RawPlaylist>;
}
