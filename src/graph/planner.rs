//! Planner status filtering.
//!
//! Planner has no status field; completion state is encoded in
//! `percentComplete`. The filter rule lives here so the HTTP proxy and the
//! MCP tool behave identically: tasks are fetched unfiltered and re-filtered
//! on the client side against the fetched percentage.

use std::fmt;
use std::str::FromStr;

use crate::graph::models::PlannerTask;

/// Completion-state filter over `percentComplete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusFilter {
    /// percentComplete == 0
    NotStarted,
    /// percentComplete in 1..=99
    InProgress,
    /// percentComplete == 100
    Completed,
}

impl TaskStatusFilter {
    pub fn matches(self, percent_complete: i32) -> bool {
        match self {
            Self::NotStarted => percent_complete == 0,
            Self::InProgress => (1..=99).contains(&percent_complete),
            Self::Completed => percent_complete == 100,
        }
    }
}

impl FromStr for TaskStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notStarted" => Ok(Self::NotStarted),
            "inProgress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unknown status '{other}' (expected notStarted, inProgress, or completed)"
            )),
        }
    }
}

impl fmt::Display for TaskStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "notStarted",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
        })
    }
}

/// Keep only the tasks matching `filter`; `None` keeps everything.
pub fn filter_by_status(
    tasks: Vec<PlannerTask>,
    filter: Option<TaskStatusFilter>,
) -> Vec<PlannerTask> {
    match filter {
        Some(filter) => tasks
            .into_iter()
            .filter(|t| filter.matches(t.percent_complete))
            .collect(),
        None => tasks,
    }
}

/// Human label for a completion percentage, for markdown summaries.
pub fn status_label(percent_complete: i32) -> &'static str {
    match percent_complete {
        0 => "not started",
        100 => "completed",
        _ => "in progress",
    }
}
