// src/config/mod.rs
pub mod analysis;
pub mod settings;

// Re-export commonly used types
pub use analysis::{AnalysisResult, RankedEntry, GeoRecord};
pub use settings::{Settings, ServerSettings, MapSettings};
