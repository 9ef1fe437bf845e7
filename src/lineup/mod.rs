//! Ordinal-indexed channel lineup
//!
//! A [`LineupIndex`] is built from one parse and is only meaningful for that
//! parse: the same ordinal may point at a different channel after the
//! playlist source changes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::FallbackConfig;
use crate::errors::{LineupError, LineupResult};
use crate::models::Channel;

/// How lineup entries expose their stream URL
///
/// Chosen at deployment time, never per request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UrlMode {
    /// Entries carry the upstream stream URL
    #[default]
    Direct,
    /// Entries point back at this service's `/auto/v{n}` resolver
    Indirect,
}

/// One element of the `/lineup.json` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    #[serde(rename = "GuideNumber")]
    pub guide_number: String,
    #[serde(rename = "GuideName")]
    pub guide_name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "HD", default, skip_serializing_if = "Option::is_none")]
    pub hd: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct LineupIndex {
    channels: Vec<Channel>,
    mode: UrlMode,
    hd_flag: bool,
}

impl LineupIndex {
    /// Build an index over parser output
    ///
    /// Channels are kept sorted by ordinal so lookups can binary search.
    pub fn build(mut channels: Vec<Channel>, mode: UrlMode) -> Self {
        channels.sort_by_key(|channel| channel.ordinal);
        channels.dedup_by_key(|channel| channel.ordinal);
        Self {
            channels,
            mode,
            hd_flag: false,
        }
    }

    /// Single-entry lineup served when the playlist source is unavailable
    ///
    /// Always rendered in direct mode: `/auto/v1` would need the same
    /// unavailable source to resolve.
    pub fn fallback(config: &FallbackConfig) -> Self {
        Self::build(
            vec![Channel {
                ordinal: 1,
                display_name: config.guide_name.clone(),
                stream_url: config.stream_url.clone(),
                tvg_id: String::new(),
                tvg_name: String::new(),
                logo: String::new(),
                group_title: String::new(),
            }],
            UrlMode::Direct,
        )
    }

    pub fn with_hd_flag(mut self, hd_flag: bool) -> Self {
        self.hd_flag = hd_flag;
        self
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, ordinal: u32) -> LineupResult<&Channel> {
        self.channels
            .binary_search_by_key(&ordinal, |channel| channel.ordinal)
            .map(|idx| &self.channels[idx])
            .map_err(|_| LineupError::UnknownChannel { ordinal })
    }

    /// URL a client should play for `channel` under the index's mode
    pub fn resolve_url(&self, channel: &Channel, base_url: &str) -> String {
        match self.mode {
            UrlMode::Direct => channel.stream_url.clone(),
            UrlMode::Indirect => tuner_url(base_url, channel.ordinal),
        }
    }

    pub fn to_response(&self, base_url: &str) -> Vec<LineupEntry> {
        self.channels
            .iter()
            .map(|channel| LineupEntry {
                guide_number: channel.ordinal.to_string(),
                guide_name: channel.display_name.clone(),
                url: self.resolve_url(channel, base_url),
                hd: self.hd_flag.then_some(1),
            })
            .collect()
    }
}

/// `{base}/auto/v{ordinal}`
pub fn tuner_url(base_url: &str, ordinal: u32) -> String {
    format!("{}/auto/v{}", base_url.trim_end_matches('/'), ordinal)
}
