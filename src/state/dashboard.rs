// src/state/dashboard.rs
use chrono::prelude::*;
use crate::config::{AnalysisResult, RankedEntry};

pub const NOT_APPLICABLE: &str = "N/A";

/// Text bindings of the summary cards.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_failures: String,
    pub top_attacker: String,
    pub top_user: String,
    pub completed_at: DateTime<Local>,
}

pub fn populate(result: &AnalysisResult) -> DashboardSummary {
    DashboardSummary {
        total_failures: result.total_failures.to_string(),
        top_attacker: leader(&result.top_5_ips),
        top_user: leader(&result.top_5_users),
        completed_at: Local::now(),
    }
}

fn leader(ranking: &[RankedEntry]) -> String {
    match ranking.first() {
        Some(entry) => format_attempts(entry),
        None => NOT_APPLICABLE.to_string(),
    }
}

pub fn format_attempts(entry: &RankedEntry) -> String {
    format!("{} ({} intentos)", entry.label(), entry.count())
}
