//! Gantt data as JSON
//!
//! Nested form of the timeline for interactive front-ends: the project
//! header plus each stage with its tasks, dates as `YYYY-MM-DD` (or `null`).

use chrono::NaiveDate;
use planxl_core::{
    business_days, MemberId, Priority, ProjectId, ProjectSnapshot, RenderError, Renderer, StageId,
    Status, TaskId,
};
use serde::Serialize;

/// JSON renderer for the nested stage/task timeline
#[derive(Clone, Debug)]
pub struct JsonTimelineRenderer {
    /// Pretty-print with indentation
    pub pretty: bool,
}

impl Default for JsonTimelineRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonTimelineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit compact single-line JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct GanttData<'a> {
    pub project: ProjectHeader<'a>,
    pub timeline: Vec<StageEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ProjectHeader<'a> {
    pub id: ProjectId,
    pub name: &'a str,
    pub description: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: &'a Status,
}

#[derive(Debug, Serialize)]
pub struct StageEntry<'a> {
    pub id: StageId,
    pub name: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub business_days: u32,
    pub progress: f64,
    pub status: &'a Status,
    pub tasks: Vec<TaskEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TaskEntry<'a> {
    pub id: TaskId,
    pub name: &'a str,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub business_days: u32,
    pub progress: f64,
    pub status: &'a Status,
    pub priority: &'a Priority,
    pub assignee: Option<AssigneeEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct AssigneeEntry<'a> {
    pub id: MemberId,
    pub name: &'a str,
    pub role: &'a str,
}

/// Build the nested timeline, preserving stage and task order
pub fn gantt_data(project: &ProjectSnapshot) -> GanttData<'_> {
    let timeline = project
        .stages
        .iter()
        .map(|stage| StageEntry {
            id: stage.id,
            name: &stage.name,
            start_date: stage.start_date,
            end_date: stage.end_date,
            business_days: business_days(stage.start_date, stage.end_date),
            progress: stage.progress,
            status: &stage.status,
            tasks: stage
                .tasks
                .iter()
                .map(|task| TaskEntry {
                    id: task.id,
                    name: &task.name,
                    start_date: task.start_date,
                    end_date: task.end_date,
                    business_days: business_days(task.start_date, task.end_date),
                    progress: task.progress,
                    status: &task.status,
                    priority: &task.priority,
                    assignee: project.assignee_of(task).map(|m| AssigneeEntry {
                        id: m.id,
                        name: &m.name,
                        role: &m.role,
                    }),
                })
                .collect(),
        })
        .collect();

    GanttData {
        project: ProjectHeader {
            id: project.id,
            name: &project.name,
            description: &project.description,
            start_date: project.start_date,
            end_date: project.end_date,
            status: &project.status,
        },
        timeline,
    }
}

impl Renderer for JsonTimelineRenderer {
    type Output = String;

    fn render(&self, project: &ProjectSnapshot) -> Result<String, RenderError> {
        let data = gantt_data(project);
        let json = if self.pretty {
            serde_json::to_string_pretty(&data)
        } else {
            serde_json::to_string(&data)
        };
        json.map_err(|e| RenderError::Format(e.to_string()))
    }
}
