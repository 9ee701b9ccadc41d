// src/config/settings.rs
use serde::{Serialize, Deserialize};
use std::time::Duration;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub map: MapSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub url: String,
    pub endpoint: String,
    pub field_name: String,
    pub timeout_secs: u64,
}

impl ServerSettings {
    pub fn analyze_url(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000".to_string(),
            endpoint: "/api/analyze".to_string(),
            field_name: "log_file".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub resize_delay_ms: u64,
}

impl MapSettings {
    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.resize_delay_ms)
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        // Frames Europe, where most of the traffic we see comes from
        Self {
            center_lat: 47.0,
            center_lon: 2.0,
            zoom: 3,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            resize_delay_ms: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_url_joins_slashes() {
        let mut server = ServerSettings::default();
        assert_eq!(server.analyze_url(), "http://127.0.0.1:5000/api/analyze");

        server.url = "https://logs.example.org/".to_string();
        server.endpoint = "api/analyze".to_string();
        assert_eq!(server.analyze_url(), "https://logs.example.org/api/analyze");
    }
}
