use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::math::COORDINATE_PRECISION;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SEARCH_PATH: &str = "/address-lookup";
pub const DEFAULT_DETAILS_PATH: &str = "/address-lookup/details";

/// Tuning for the location selection controller.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Quiet period after the last keystroke before searching
    pub debounce_ms: u64,
    /// Shorter queries are never sent to the gateway
    pub min_query_length: usize,
    /// Zoom applied when a search candidate is selected
    pub selected_zoom: u8,
    /// Zoom for a seed without coordinates (whole world)
    pub blank_zoom: u8,
    /// Decimal places compared when deciding if the map moved
    pub coordinate_precision: u32,
    pub request_timeout_secs: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            min_query_length: 3,
            selected_zoom: 16,
            blank_zoom: 1,
            coordinate_precision: COORDINATE_PRECISION,
            request_timeout_secs: 10,
        }
    }
}

impl SelectionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Root client configuration (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub search_path: String,
    pub details_path: String,
    pub selection: SelectionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            details_path: DEFAULT_DETAILS_PATH.to_string(),
            selection: SelectionConfig::default(),
        }
    }
}
