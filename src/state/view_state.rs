// src/state/view_state.rs
use crate::config::AnalysisResult;
use crate::errors::AnalysisError;

/// What the window is currently showing. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Failed(String),
}

/// Identifies one submission. Only the newest ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct ViewStateController {
    state: ViewState,
    latest: u64,
}

impl Default for ViewStateController {
    fn default() -> Self {
        Self {
            state: ViewState::Idle,
            latest: 0,
        }
    }
}

impl ViewStateController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle. Whatever was in flight before is abandoned.
    pub fn begin(&mut self) -> RequestTicket {
        if self.is_loading() {
            tracing::debug!("Abandoning request #{}", self.latest);
        }
        self.latest += 1;
        self.state = ViewState::Loading;
        RequestTicket(self.latest)
    }

    pub fn settle(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Settle {
        if ticket.0 != self.latest || !self.is_loading() {
            tracing::debug!(
                "Discarding stale response #{} (latest is #{})",
                ticket.0,
                self.latest
            );
            return Settle::Stale;
        }

        self.state = match outcome {
            Ok(result) => {
                tracing::info!(
                    "Request #{} succeeded: {} failed logins",
                    ticket.0,
                    result.total_failures
                );
                ViewState::Success(result)
            }
            Err(err) => {
                tracing::warn!("Request #{} failed ({}): {}", ticket.0, err.category(), err);
                ViewState::Failed(err.to_string())
            }
        };
        Settle::Applied
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    pub fn spinner_visible(&self) -> bool {
        self.is_loading()
    }

    pub fn error_text(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn dashboard_visible(&self) -> bool {
        matches!(self.state, ViewState::Success(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }
}
