//! # planxl-core
//!
//! Core domain model and traits for the planxl timeline exporter.
//!
//! This crate provides:
//! - Domain types: `ProjectSnapshot`, `Stage`, `Task`, `TeamMember`
//! - Status and priority codes with lossless handling of unknown codes
//! - Calendar arithmetic: the day grid and business-day counting
//! - Core traits: `SnapshotSource` (data access), `Renderer`
//! - Typed partial updates for stages and tasks
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use planxl_core::{ProjectSnapshot, Stage, Status, Task, TeamMember};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//!
//! let project = ProjectSnapshot::new(1, "Launch", day(1), day(10))
//!     .member(TeamMember::new(7, "Ana").role("backend"))
//!     .stage(
//!         Stage::new(10, "Design")
//!             .dates(day(1), day(5))
//!             .status(Status::InProgress)
//!             .task(Task::new(100, "Wireframes").dates(day(2), day(3)).assign(7)),
//!     );
//!
//! let task = &project.stages[0].tasks[0];
//! assert_eq!(project.assignee_of(task).map(|m| m.name.as_str()), Some("Ana"));
//! ```

pub mod calendar;
pub mod roles;
pub mod update;

pub use calendar::{business_days, is_weekend, DateGrid};
pub use update::{StageUpdate, TaskUpdate, UpdateError, UpdateField};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a project
pub type ProjectId = u64;

/// Unique identifier for a stage
pub type StageId = u64;

/// Unique identifier for a task
pub type TaskId = u64;

/// Unique identifier for a team member
pub type MemberId = u64;

// ============================================================================
// Status & Priority Codes
// ============================================================================

/// Lifecycle status of a project, stage or task.
///
/// Codes that are not recognized are kept verbatim in `Other` so they can be
/// displayed unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    Active,
    Paused,
    Other(String),
}

impl Status {
    /// Parse a status code (`pending`, `in_progress`, ...)
    pub fn from_code(code: &str) -> Self {
        match code {
            "pending" => Status::Pending,
            "in_progress" => Status::InProgress,
            "completed" => Status::Completed,
            "active" => Status::Active,
            "paused" => Status::Paused,
            other => Status::Other(other.to_string()),
        }
    }

    /// The wire code for this status
    pub fn code(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Active => "active",
            Status::Paused => "paused",
            Status::Other(code) => code,
        }
    }
}

impl From<String> for Status {
    fn from(code: String) -> Self {
        match Status::from_code(&code) {
            Status::Other(_) => Status::Other(code),
            known => known,
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.code().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Task priority
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    Other(String),
}

impl Priority {
    /// Parse a priority code (`low`, `medium`, `high`, `urgent`)
    pub fn from_code(code: &str) -> Self {
        match code {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            other => Priority::Other(other.to_string()),
        }
    }

    /// The wire code for this priority
    pub fn code(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
            Priority::Other(code) => code,
        }
    }
}

impl From<String> for Priority {
    fn from(code: String) -> Self {
        match Priority::from_code(&code) {
            Priority::Other(_) => Priority::Other(code),
            known => known,
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.code().to_string()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Project Snapshot
// ============================================================================

/// A fully resolved project aggregate, as supplied for one export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_project_status")]
    pub status: Status,
    /// Stages in stored order
    #[serde(default)]
    pub stages: Vec<Stage>,
    /// Team roster in stored order
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

fn default_project_status() -> Status {
    Status::Active
}

impl ProjectSnapshot {
    /// Create an empty project spanning `start..=end`
    pub fn new(id: ProjectId, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            start_date: start,
            end_date: end,
            status: Status::Active,
            stages: Vec::new(),
            team_members: Vec::new(),
        }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Append a stage
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append a team member
    pub fn member(mut self, member: TeamMember) -> Self {
        self.team_members.push(member);
        self
    }

    /// Look up a team member by id
    pub fn get_member(&self, id: MemberId) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.id == id)
    }

    /// Resolve a task's assignee through the roster
    pub fn assignee_of(&self, task: &Task) -> Option<&TeamMember> {
        task.assigned_to.and_then(|id| self.get_member(id))
    }

    /// Number of tasks across all stages
    pub fn task_count(&self) -> usize {
        self.stages.iter().map(|s| s.tasks.len()).sum()
    }
}

/// A project stage (phase) grouping tasks
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,
    /// Tasks in stored order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Stage {
    pub fn new(id: StageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            status: Status::Pending,
            progress: 0.0,
            tasks: Vec::new(),
        }
    }

    /// Set start and end dates
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Append a task
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

/// A unit of work inside a stage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,
    /// Weak reference into the project's team roster
    #[serde(default)]
    pub assigned_to: Option<MemberId>,
}

impl Task {
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            status: Status::Pending,
            priority: Priority::Medium,
            progress: 0.0,
            assigned_to: None,
        }
    }

    /// Set start and end dates
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set only the start date, leaving the end unset
    pub fn starts(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Assign to a team member
    pub fn assign(mut self, member: MemberId) -> Self {
        self.assigned_to = Some(member);
        self
    }
}

/// A member of the project team
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: MemberId,
    pub name: String,
    /// Role code (pm, po, frontend, backend, ...)
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    /// Avatar URL or path
    #[serde(default)]
    pub avatar: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "default_created_at")]
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

fn default_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

impl TeamMember {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: String::new(),
            email: String::new(),
            avatar: String::new(),
            is_active: true,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn joined(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Data-access collaborator supplying fully populated project snapshots
pub trait SnapshotSource {
    /// Load one project with its stages, tasks and team roster
    fn load(&self, id: ProjectId) -> Result<ProjectSnapshot, SourceError>;
}

/// Output renderer trait
pub trait Renderer {
    type Output;

    /// Render a project snapshot to the output format
    fn render(&self, project: &ProjectSnapshot) -> Result<Self::Output, RenderError>;
}

/// Snapshot source backed by a map, mostly for tests and embedding
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    projects: HashMap<ProjectId, ProjectSnapshot>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a project
    pub fn insert(&mut self, project: ProjectSnapshot) {
        self.projects.insert(project.id, project);
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl FromIterator<ProjectSnapshot> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = ProjectSnapshot>>(iter: I) -> Self {
        let mut source = Self::new();
        for project in iter {
            source.insert(project);
        }
        source
    }
}

impl SnapshotSource for InMemorySource {
    fn load(&self, id: ProjectId) -> Result<ProjectSnapshot, SourceError> {
        self.projects.get(&id).cloned().ok_or(SourceError::NotFound(id))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Data-access error
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    #[error("Unreadable snapshot: {0}")]
    Unreadable(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
