/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6077;
pub const DEFAULT_PLATFORM_URL_ENV: &str = "RENDER_EXTERNAL_URL";
pub const DEFAULT_INDEX_PAGE: bool = true;

// Base URL used when neither the config nor the platform provides one
pub const DEFAULT_BASE_URL: &str = "http://localhost:6077";

// Source defaults
pub const DEFAULT_HTTP_TIMEOUT: &str = "10s";
pub const DEFAULT_HTTP_CONNECT_TIMEOUT: &str = "5s";
pub const DEFAULT_CACHE_TTL: &str = "0s";

// Fallback lineup defaults
pub const DEFAULT_FALLBACK_ENABLED: bool = true;
pub const DEFAULT_FALLBACK_GUIDE_NAME: &str = "Sample Channel 1";
pub const DEFAULT_FALLBACK_STREAM_URL: &str =
    "https://sample-videos.com/zip/10/mp4/SampleVideo_1280x720_1mb.mp4";

// Device identity defaults
pub const DEFAULT_FRIENDLY_NAME: &str = "M3U Tuner";
pub const DEFAULT_MANUFACTURER: &str = "Silicondust";
pub const DEFAULT_MODEL_NUMBER: &str = "HDHR4-2US";
pub const DEFAULT_FIRMWARE_NAME: &str = "hdhomerun4_atsc";
pub const DEFAULT_FIRMWARE_VERSION: &str = "20200101";
pub const DEFAULT_DEVICE_ID: &str = "12345678";
pub const DEFAULT_DEVICE_AUTH: &str = "test1234";
pub const DEFAULT_TUNER_COUNT: u32 = 2;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variable layering
pub const ENV_PREFIX: &str = "M3U_TUNER_";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
