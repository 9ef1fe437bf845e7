//! Tuner protocol logic independent of the HTTP framework
//!
//! Every lineup or tune request performs its own fetch and parse; the only
//! shared state is the immutable configuration captured at construction.

use std::sync::Arc;
use tracing::{debug, warn};

use super::{DeviceDescriptor, LineupStatus};
use crate::config::{Config, DeviceConfig, FallbackConfig, LineupConfig};
use crate::errors::{LineupError, LineupResult, SourceError, SourceResult};
use crate::lineup::{LineupEntry, LineupIndex};
use crate::m3u::M3uParser;
use crate::observability::TunerMetrics;
use crate::sources::PlaylistSource;

/// Result of a `/lineup.json` request
#[derive(Debug)]
pub enum LineupOutcome {
    /// Built from the playlist source
    Live(Vec<LineupEntry>),
    /// Source failed; the single fallback channel is served instead
    Fallback {
        entries: Vec<LineupEntry>,
        cause: SourceError,
    },
}

impl LineupOutcome {
    pub fn entries(&self) -> &[LineupEntry] {
        match self {
            Self::Live(entries) | Self::Fallback { entries, .. } => entries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

pub struct DeviceEmulator {
    source: Arc<dyn PlaylistSource>,
    base_url: Arc<str>,
    lineup: LineupConfig,
    fallback: FallbackConfig,
    device: DeviceConfig,
    metrics: TunerMetrics,
}

impl DeviceEmulator {
    pub fn new(
        config: &Config,
        source: Arc<dyn PlaylistSource>,
        base_url: impl Into<Arc<str>>,
        metrics: TunerMetrics,
    ) -> Self {
        Self {
            source,
            base_url: base_url.into(),
            lineup: config.lineup.clone(),
            fallback: config.fallback.clone(),
            device: config.device.clone(),
            metrics,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn source(&self) -> &Arc<dyn PlaylistSource> {
        &self.source
    }

    pub fn lineup_config(&self) -> &LineupConfig {
        &self.lineup
    }

    pub fn device_config(&self) -> &DeviceConfig {
        &self.device
    }

    pub fn discover(&self) -> DeviceDescriptor {
        DeviceDescriptor::new(&self.device, &self.base_url)
    }

    pub fn lineup_status(&self) -> LineupStatus {
        LineupStatus::idle(self.device.tuner_count)
    }

    /// Fetch, parse and index the playlist
    pub async fn load_lineup(&self) -> SourceResult<LineupIndex> {
        let result = self.source.fetch().await;
        self.metrics.record_fetch(self.source.kind(), result.is_ok());

        let playlist = result.inspect_err(|e| {
            warn!("Playlist fetch from {} failed: {}", self.source.describe(), e);
        })?;
        debug!(
            "Fetched {} bytes of playlist from {} ({})",
            playlist.content.len(),
            playlist.origin,
            playlist.kind
        );

        let report = M3uParser::parse_with_report(&playlist.content);
        if report.missing_header {
            debug!("Playlist from {} has no #EXTM3U header", playlist.origin);
        }
        self.metrics.record_parse(report.channels.len());

        Ok(LineupIndex::build(report.channels, self.lineup.url_mode).with_hd_flag(self.lineup.hd_flag))
    }

    /// Lineup for `/lineup.json`, degrading to the fallback channel
    ///
    /// Returns the source error only when the fallback is disabled.
    pub async fn lineup(&self) -> SourceResult<LineupOutcome> {
        match self.load_lineup().await {
            Ok(index) => Ok(LineupOutcome::Live(index.to_response(&self.base_url))),
            Err(cause) if self.fallback.enabled => {
                warn!(
                    "Serving fallback lineup '{}' because the playlist source is unavailable: {}",
                    self.fallback.guide_name, cause
                );
                self.metrics.record_fallback();
                let entries = LineupIndex::fallback(&self.fallback)
                    .with_hd_flag(self.lineup.hd_flag)
                    .to_response(&self.base_url);
                Ok(LineupOutcome::Fallback { entries, cause })
            }
            Err(cause) => Err(cause),
        }
    }

    /// Upstream stream URL for a tuner ordinal
    ///
    /// A source failure is reported as an unknown channel: the client can
    /// only act on "not found".
    pub async fn resolve_stream(&self, ordinal: u32) -> LineupResult<String> {
        let index = self.load_lineup().await.map_err(|e| {
            debug!("Cannot resolve channel {} without a playlist: {}", ordinal, e);
            LineupError::UnknownChannel { ordinal }
        })?;

        let url = index.get(ordinal)?.stream_url.clone();
        self.metrics.record_redirect();
        Ok(url)
    }
}

/// Parse the `v{n}` segment of `/auto/v{n}` into a positive ordinal
pub fn parse_tuner_channel(segment: &str) -> LineupResult<u32> {
    let digits = segment
        .strip_prefix('v')
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| LineupError::invalid_path(format!("/auto/{segment}")))?;

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(LineupError::invalid_path(format!("/auto/{segment}"))),
        Ok(ordinal) => Ok(ordinal),
    }
}
