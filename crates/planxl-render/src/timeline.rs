//! Flattening of the stage/task tree into timeline rows
//!
//! Rows come out in document order: each stage is immediately followed by
//! its own tasks, and stages keep their stored order. Dates never reorder
//! anything.

use chrono::NaiveDate;
use planxl_core::{business_days, Priority, ProjectSnapshot, Status};
use serde::Serialize;

/// Whether a row represents a stage or one of its tasks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Stage,
    Task,
}

/// One line of the tabular and visual sheets
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineRow {
    pub kind: RowKind,
    /// Name of the stage this row belongs to (its own name for stage rows)
    pub stage: String,
    /// Stage or task name, without indentation
    pub label: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub business_days: u32,
    pub status: Status,
    /// Tasks only
    pub priority: Option<Priority>,
    /// Tasks only; `None` when unassigned or unresolved
    pub assignee: Option<String>,
    pub progress: f64,
}

impl TimelineRow {
    /// Indentation level: 0 for stages, 1 for tasks
    pub fn indent(&self) -> u8 {
        match self.kind {
            RowKind::Stage => 0,
            RowKind::Task => 1,
        }
    }

    /// Dates that cannot be drawn: either end unset, or start after end
    pub fn is_degenerate(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start > end,
            _ => true,
        }
    }

    pub fn start_text(&self) -> String {
        format_date(self.start)
    }

    pub fn end_text(&self) -> String {
        format_date(self.end)
    }

    pub fn progress_text(&self) -> String {
        format_percent(self.progress)
    }
}

/// Flatten the project's stages and tasks into rows, in document order
pub fn compose_rows(project: &ProjectSnapshot) -> Vec<TimelineRow> {
    let mut rows = Vec::with_capacity(project.stages.len() + project.task_count());

    for stage in &project.stages {
        rows.push(TimelineRow {
            kind: RowKind::Stage,
            stage: stage.name.clone(),
            label: stage.name.clone(),
            start: stage.start_date,
            end: stage.end_date,
            business_days: business_days(stage.start_date, stage.end_date),
            status: stage.status.clone(),
            priority: None,
            assignee: None,
            progress: stage.progress,
        });

        for task in &stage.tasks {
            rows.push(TimelineRow {
                kind: RowKind::Task,
                stage: stage.name.clone(),
                label: task.name.clone(),
                start: task.start_date,
                end: task.end_date,
                business_days: business_days(task.start_date, task.end_date),
                status: task.status.clone(),
                priority: Some(task.priority.clone()),
                assignee: project.assignee_of(task).map(|m| m.name.clone()),
                progress: task.progress,
            });
        }
    }

    rows
}

/// `YYYY-MM-DD`, or empty for an unset date
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// One decimal digit followed by `%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
