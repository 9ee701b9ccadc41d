// src/ui/mod.rs
pub mod chart;
pub mod dashboard;
pub mod map;
pub mod upload;

use crate::state::Session;

pub use chart::EguiChartBackend;
pub use map::EguiMapBackend;

pub type DashboardSession = Session<EguiChartBackend, EguiMapBackend>;
