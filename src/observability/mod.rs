use anyhow::Result;
use opentelemetry::{
    KeyValue,
    metrics::{Counter, Meter, MeterProvider},
};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};
use crate::models::SourceKind;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let log_filter = if config.level == "trace" {
        format!("m3u_tuner={},tower_http=trace", config.level)
    } else {
        format!("m3u_tuner={}", config.level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

/// Counters describing playlist fetches and protocol outcomes
///
/// No exporter is attached by default; the meter provider is kept alive
/// alongside the instruments so a reader can be added without code changes.
#[derive(Clone)]
pub struct TunerMetrics {
    pub meter: Meter,
    _provider: SdkMeterProvider,

    pub source_fetches: Counter<u64>,
    pub source_failures: Counter<u64>,
    pub fallback_lineups: Counter<u64>,
    pub stream_redirects: Counter<u64>,
    pub channels_parsed: Counter<u64>,
}

impl TunerMetrics {
    pub fn new() -> Self {
        Self::with_provider(SdkMeterProvider::builder().build())
    }

    pub fn with_provider(provider: SdkMeterProvider) -> Self {
        let meter = provider.meter("m3u-tuner");

        let source_fetches = meter
            .u64_counter("tuner_source_fetches_total")
            .with_description("Playlist fetches attempted")
            .build();
        let source_failures = meter
            .u64_counter("tuner_source_failures_total")
            .with_description("Playlist fetches that failed")
            .build();
        let fallback_lineups = meter
            .u64_counter("tuner_fallback_lineups_total")
            .with_description("Lineup requests answered with the fallback channel")
            .build();
        let stream_redirects = meter
            .u64_counter("tuner_stream_redirects_total")
            .with_description("Tuner requests redirected to a stream")
            .build();
        let channels_parsed = meter
            .u64_counter("tuner_channels_parsed_total")
            .with_description("Channels accepted by the playlist parser")
            .build();

        info!("Metrics configured: local meter provider, no exporter");

        Self {
            meter,
            _provider: provider,
            source_fetches,
            source_failures,
            fallback_lineups,
            stream_redirects,
            channels_parsed,
        }
    }

    pub fn record_fetch(&self, kind: SourceKind, succeeded: bool) {
        let attributes = [KeyValue::new("source_kind", kind.to_string())];
        self.source_fetches.add(1, &attributes);
        if !succeeded {
            self.source_failures.add(1, &attributes);
        }
    }

    pub fn record_parse(&self, channels: usize) {
        self.channels_parsed.add(channels as u64, &[]);
    }

    pub fn record_fallback(&self) {
        self.fallback_lineups.add(1, &[]);
    }

    pub fn record_redirect(&self) {
        self.stream_redirects.add(1, &[]);
    }
}

impl Default for TunerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
