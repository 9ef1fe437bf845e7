//! Domain models shared by the parser, the lineup and the web layer

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a raw playlist came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    File,
    Http,
    Embedded,
}

/// Raw M3U text as produced by a single fetch
///
/// Owned by the fetch that produced it; nothing retains it past the request
/// except the optional source cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlaylist {
    pub kind: SourceKind,
    /// Human readable origin (path, obfuscated URL or `embedded`)
    pub origin: String,
    pub content: String,
}

impl RawPlaylist {
    pub fn new(kind: SourceKind, origin: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            origin: origin.into(),
            content: content.into(),
        }
    }
}

/// A playlist entry accepted by the parser
///
/// Only the parser creates channels; `ordinal` is 1-based and unique within
/// the parse that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub ordinal: u32,
    pub display_name: String,
    pub stream_url: String,
    pub tvg_id: String,
    pub tvg_name: String,
    pub logo: String,
    pub group_title: String,
}
