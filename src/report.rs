//! Completion reporting over a rolling window.
//!
//! A task qualifies when it is Completed and its history holds at least one
//! entry inside the trailing window; qualifying tasks are grouped by owning
//! user. The value per user is the raw count of qualifying tasks. Users
//! with no qualifying tasks are absent from the output.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::history::HistoryStore;
use crate::task::TaskStore;

/// Length of the trailing report window, in days
pub const LOOKBACK_DAYS: i64 = 30;

/// Per-user completion count for the window; derived, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    pub user_id: String,
    pub tasks_completed: usize,
}

/// Build the report as of `now` (inclusive lower bound `now - 30 days`)
pub fn performance_report(
    tasks: &TaskStore,
    history: &HistoryStore,
    now: DateTime<Utc>,
) -> Result<Vec<PerformanceReport>> {
    let cutoff = now - Duration::days(LOOKBACK_DAYS);
    let changed = history.tasks_changed_since(cutoff)?;

    let mut by_user: HashMap<String, usize> = HashMap::new();
    for task in tasks.completed()? {
        if changed.contains(&task.id) {
            *by_user.entry(task.user_id).or_default() += 1;
        }
    }

    let mut reports: Vec<PerformanceReport> = by_user
        .into_iter()
        .map(|(user_id, tasks_completed)| PerformanceReport {
            user_id,
            tasks_completed,
        })
        .collect();
    reports.sort_by(|a, b| a.user_id.cmp(&b.user_id));
    Ok(reports)
}
