// src/config/analysis.rs
use serde::{Serialize, Deserialize};

/// Payload returned by the analysis service for one uploaded log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_failures: u64,
    pub top_5_ips: Vec<RankedEntry>,
    pub top_5_users: Vec<RankedEntry>,
    pub geo_data: Vec<GeoRecord>,
}

/// One `[label, count]` pair of a ranking, already ordered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry(pub String, pub u64);

impl RankedEntry {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self(label.into(), count)
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn count(&self) -> u64 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub ip: String,
    pub country: String,
    pub count: u64,
    pub lat: f64,
    pub lon: f64,
}

impl GeoRecord {
    /// `(0, 0)` is what the service reports when the lookup failed.
    pub fn is_located(&self) -> bool {
        !(self.lat == 0.0 && self.lon == 0.0)
    }

    pub fn popup_text(&self) -> String {
        format!("{}\n{}\n{} intentos.", self.ip, self.country, self.count)
    }
}
