//! Tuner device identity and status documents
//!
//! Field names are fixed by the discovery protocol and must match exactly.

pub mod base_url;
pub mod emulator;

pub use base_url::{BaseUrlOrigin, BaseUrlResolver};
pub use emulator::{DeviceEmulator, LineupOutcome, parse_tuner_channel};

use serde::{Deserialize, Serialize};

use crate::config::DeviceConfig;

const LINEUP_PATH: &str = "/lineup.json";
const SIGNAL_SOURCE: &str = "Cable";

/// `/discover.json` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceDescriptor {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub firmware_name: String,
    pub firmware_version: String,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    pub device_auth: String,
    #[serde(rename = "BaseURL")]
    pub base_url: String,
    #[serde(rename = "LineupURL")]
    pub lineup_url: String,
}

impl DeviceDescriptor {
    pub fn new(config: &DeviceConfig, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            friendly_name: config.friendly_name.clone(),
            manufacturer: config.manufacturer.clone(),
            model_number: config.model_number.clone(),
            firmware_name: config.firmware_name.clone(),
            firmware_version: config.firmware_version.clone(),
            device_id: config.device_id.clone(),
            device_auth: config.device_auth.clone(),
            base_url: base_url.to_string(),
            lineup_url: format!("{base_url}{LINEUP_PATH}"),
        }
    }
}

/// `/lineup_status.json` body; never depends on playlist state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineupStatus {
    pub scan_in_progress: u8,
    pub scan_possible: u8,
    pub source: String,
    pub source_list: Vec<String>,
    pub tuners: u32,
}

impl LineupStatus {
    pub fn idle(tuners: u32) -> Self {
        Self {
            scan_in_progress: 0,
            scan_possible: 1,
            source: SIGNAL_SOURCE.to_string(),
            source_list: vec![SIGNAL_SOURCE.to_string()],
            tuners,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_keys() {
        let descriptor = DeviceDescriptor::new(&DeviceConfig::default(), "https://example.com");
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["BaseURL"], "https://example.com");
        assert_eq!(value["LineupURL"], "https://example.com/lineup.json");
        assert_eq!(value["DeviceID"], "12345678");
        assert_eq!(value["DeviceAuth"], "test1234");
        assert_eq!(value["ModelNumber"], "HDHR4-2US");
        assert_eq!(value["FirmwareName"], "hdhomerun4_atsc");
        assert_eq!(value["FirmwareVersion"], "20200101");
        assert_eq!(value["Manufacturer"], "Silicondust");
        assert!(value.get("FriendlyName").is_some());
        assert_eq!(value.as_object().unwrap().len(), 9);
    }

    #[test]
    fn test_lineup_status_shape() {
        let value = serde_json::to_value(LineupStatus::idle(2)).unwrap();
        assert_eq!(
            value,
            json!({
                "ScanInProgress": 0,
                "ScanPossible": 1,
                "Source": "Cable",
                "SourceList": ["Cable"],
                "Tuners": 2
            })
        );
    }
}
