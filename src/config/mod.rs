use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use strum::{Display, EnumString};

pub mod defaults;
pub mod duration_serde;

use crate::errors::{AppError, AppResult};
use crate::lineup::UrlMode;
use defaults::*;
use duration_serde::duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub lineup: LineupConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally reachable base URL; wins over the platform variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Name of the environment variable a hosting platform uses to publish
    /// the service's external URL
    #[serde(default = "default_platform_url_env")]
    pub platform_url_env: String,
    #[serde(default = "default_index_page")]
    pub index_page: bool,
}

/// Playlist source selection plus the optional response cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(flatten)]
    pub spec: SourceSpec,
    /// `0s` disables caching, so every request fetches
    #[serde(with = "duration", default = "default_cache_ttl")]
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    File {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(with = "duration", default = "default_http_timeout")]
        timeout: Duration,
        #[serde(with = "duration", default = "default_http_connect_timeout")]
        connect_timeout: Duration,
    },
    Embedded {
        /// Replaces the built-in sample playlist when set
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    /// Children are tried in order; the first success wins
    Chain { sources: Vec<SourceSpec> },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineupConfig {
    #[serde(default)]
    pub url_mode: UrlMode,
    /// Emit `"HD": 1` on every lineup entry
    #[serde(default)]
    pub hd_flag: bool,
}

/// Single sample channel served when the playlist source is unavailable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_fallback_enabled")]
    pub enabled: bool,
    #[serde(default = "default_fallback_guide_name")]
    pub guide_name: String,
    #[serde(default = "default_fallback_stream_url")]
    pub stream_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_friendly_name")]
    pub friendly_name: String,
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,
    #[serde(default = "default_model_number")]
    pub model_number: String,
    #[serde(default = "default_firmware_name")]
    pub firmware_name: String,
    #[serde(default = "default_firmware_version")]
    pub firmware_version: String,
    #[serde(default = "default_device_id")]
    pub device_id: String,
    #[serde(default = "default_device_auth")]
    pub device_auth: String,
    #[serde(default = "default_tuner_count")]
    pub tuner_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_platform_url_env() -> String {
    DEFAULT_PLATFORM_URL_ENV.to_string()
}

fn default_index_page() -> bool {
    DEFAULT_INDEX_PAGE
}

fn parse_default_duration(value: &str) -> Duration {
    humantime::parse_duration(value).unwrap_or_default()
}

fn default_http_timeout() -> Duration {
    parse_default_duration(DEFAULT_HTTP_TIMEOUT)
}

fn default_http_connect_timeout() -> Duration {
    parse_default_duration(DEFAULT_HTTP_CONNECT_TIMEOUT)
}

fn default_cache_ttl() -> Duration {
    parse_default_duration(DEFAULT_CACHE_TTL)
}

fn default_fallback_enabled() -> bool {
    DEFAULT_FALLBACK_ENABLED
}

fn default_fallback_guide_name() -> String {
    DEFAULT_FALLBACK_GUIDE_NAME.to_string()
}

fn default_fallback_stream_url() -> String {
    DEFAULT_FALLBACK_STREAM_URL.to_string()
}

fn default_friendly_name() -> String {
    DEFAULT_FRIENDLY_NAME.to_string()
}

fn default_manufacturer() -> String {
    DEFAULT_MANUFACTURER.to_string()
}

fn default_model_number() -> String {
    DEFAULT_MODEL_NUMBER.to_string()
}

fn default_firmware_name() -> String {
    DEFAULT_FIRMWARE_NAME.to_string()
}

fn default_firmware_version() -> String {
    DEFAULT_FIRMWARE_VERSION.to_string()
}

fn default_device_id() -> String {
    DEFAULT_DEVICE_ID.to_string()
}

fn default_device_auth() -> String {
    DEFAULT_DEVICE_AUTH.to_string()
}

fn default_tuner_count() -> u32 {
    DEFAULT_TUNER_COUNT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            platform_url_env: default_platform_url_env(),
            index_page: default_index_page(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            spec: SourceSpec::Embedded { content: None },
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl SourceSpec {
    /// HTTP source with the default timeouts
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            timeout: default_http_timeout(),
            connect_timeout: default_http_connect_timeout(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        match self {
            Self::File { path } if path.as_os_str().is_empty() => {
                Err(AppError::configuration("file source requires a path"))
            }
            Self::Http { url, timeout, .. } => {
                let parsed = url::Url::parse(url).map_err(|e| {
                    AppError::configuration(format!("invalid http source url '{url}': {e}"))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::configuration(format!(
                        "http source url must use http or https, got '{}'",
                        parsed.scheme()
                    )));
                }
                if timeout.is_zero() {
                    return Err(AppError::configuration("http source timeout must be non-zero"));
                }
                Ok(())
            }
            Self::Chain { sources } if sources.is_empty() => Err(AppError::configuration(
                "chain source requires at least one child source",
            )),
            Self::Chain { sources } => sources.iter().try_for_each(Self::validate),
            _ => Ok(()),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: default_fallback_enabled(),
            guide_name: default_fallback_guide_name(),
            stream_url: default_fallback_stream_url(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            friendly_name: default_friendly_name(),
            manufacturer: default_manufacturer(),
            model_number: default_model_number(),
            firmware_name: default_firmware_name(),
            firmware_version: default_firmware_version(),
            device_id: default_device_id(),
            device_auth: default_device_auth(),
            tuner_count: default_tuner_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Write the default configuration to `config_file` unless it exists
    ///
    /// Returns whether a file was written.
    pub fn write_default_if_missing(config_file: &str) -> AppResult<bool> {
        if std::path::Path::new(config_file).exists() {
            return Ok(false);
        }
        let contents = toml::to_string_pretty(&Self::default())
            .map_err(|e| AppError::configuration(format!("failed to render default config: {e}")))?;
        std::fs::write(config_file, contents)
            .map_err(|e| AppError::configuration(format!("failed to write {config_file}: {e}")))?;
        Ok(true)
    }

    /// Load defaults, then the TOML file, then `M3U_TUNER_*` variables
    ///
    /// A missing file contributes nothing. The result is not validated since
    /// command line overrides still apply on top; call [`Config::validate`]
    /// once the final values are in place.
    pub fn load_from_file(config_file: &str) -> AppResult<Self> {
        Self::figment(config_file)
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))
    }

    /// The provider stack used by [`Config::load_from_file`]
    pub fn figment(config_file: &str) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.web.port == 0 {
            return Err(AppError::configuration("web.port must be non-zero"));
        }
        self.source.spec.validate()?;
        if !self.fallback.stream_url.starts_with("http") {
            return Err(AppError::configuration(format!(
                "fallback.stream_url must start with http, got '{}'",
                self.fallback.stream_url
            )));
        }
        Ok(())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}
