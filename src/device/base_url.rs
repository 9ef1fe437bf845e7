//! Externally reachable base URL
//!
//! Precedence: explicit configuration, then the URL a hosting platform
//! publishes through an environment variable, then [`DEFAULT_BASE_URL`]. The
//! result always has an http(s) scheme and no trailing slash, and is computed
//! once per resolver.

use std::sync::OnceLock;
use tracing::{info, warn};

use crate::config::defaults::DEFAULT_BASE_URL;
use crate::config::WebConfig;
use crate::utils::UrlUtils;

/// Where the resolved base URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BaseUrlOrigin {
    Configured,
    Platform,
    Fallback,
}

#[derive(Debug)]
pub struct BaseUrlResolver {
    configured: Option<String>,
    platform: Option<String>,
    resolved: OnceLock<(String, BaseUrlOrigin)>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl BaseUrlResolver {
    pub fn new(configured: Option<String>, platform: Option<String>) -> Self {
        Self {
            configured: non_blank(configured),
            platform: non_blank(platform),
            resolved: OnceLock::new(),
        }
    }

    /// Read the platform variable named in the web config, once
    pub fn from_config(config: &WebConfig) -> Self {
        let platform = std::env::var(&config.platform_url_env).ok();
        Self::new(config.base_url.clone(), platform)
    }

    pub fn resolve(&self) -> &str {
        &self.resolved_with_origin().0
    }

    pub fn origin(&self) -> BaseUrlOrigin {
        self.resolved_with_origin().1
    }

    fn resolved_with_origin(&self) -> &(String, BaseUrlOrigin) {
        self.resolved.get_or_init(|| {
            let (raw, origin) = match (&self.configured, &self.platform) {
                (Some(url), _) => (url.as_str(), BaseUrlOrigin::Configured),
                (None, Some(url)) => (url.as_str(), BaseUrlOrigin::Platform),
                (None, None) => (DEFAULT_BASE_URL, BaseUrlOrigin::Fallback),
            };

            let url = UrlUtils::sanitize(raw);
            if !UrlUtils::is_valid(&url) {
                warn!("Base URL '{}' does not parse as a URL, using it anyway", url);
            }
            info!("Base URL: {} ({})", url, origin);
            (url, origin)
        })
    }
}
