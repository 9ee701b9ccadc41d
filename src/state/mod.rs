// src/state/mod.rs
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{AnalysisResult, MapSettings};
use crate::errors::AnalysisError;

pub mod chart_state;
pub mod dashboard;
pub mod map_state;
pub mod view_state;

pub use chart_state::{ChartBackend, ChartLifecycleManager};
pub use dashboard::DashboardSummary;
pub use map_state::{MapBackend, MapLifecycleManager};
pub use view_state::{RequestTicket, Settle, ViewState, ViewStateController};

// Core application state: one upload/analysis cycle at a time, plus the
// chart and map it owns.
pub struct Session<C: ChartBackend, M: MapBackend> {
    pub selected_file: Option<PathBuf>,
    pub view: ViewStateController,
    pub summary: Option<DashboardSummary>,
    pub chart: ChartLifecycleManager<C>,
    pub map: MapLifecycleManager<M>,
}

impl<C: ChartBackend, M: MapBackend> Session<C, M> {
    pub fn new(chart_backend: C, map_backend: M, map_settings: &MapSettings) -> Self {
        Self {
            selected_file: None,
            view: ViewStateController::new(),
            summary: None,
            chart: ChartLifecycleManager::new(chart_backend),
            map: MapLifecycleManager::new(map_backend, map_settings),
        }
    }

    /// Enters `Loading` and hands back the file to upload, or `None` when
    /// nothing is selected and the cycle already failed. Reading the file is
    /// left to the worker.
    pub fn begin_submission(&mut self, now: Instant) -> Option<(RequestTicket, PathBuf)> {
        let ticket = self.view.begin();

        match self.selected_file.clone() {
            Some(path) => {
                tracing::info!("Submitting {} as request #{}", path.display(), ticket.seq());
                Some((ticket, path))
            }
            None => {
                self.complete(ticket, Err(AnalysisError::NoFileSelected), now);
                None
            }
        }
    }

    /// Applies the outcome of `ticket`. Superseded outcomes are dropped
    /// without touching the dashboard.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
        now: Instant,
    ) -> Settle {
        let settle = self.view.settle(ticket, outcome);
        if settle == Settle::Stale {
            return settle;
        }

        if let Some(result) = self.view.result() {
            self.summary = Some(dashboard::populate(result));
            self.chart.render(&result.top_5_ips);
            self.map.render(&result.geo_data);
            // The dashboard only becomes visible on this frame
            self.map.schedule_resize(now);
        }
        settle
    }
}
