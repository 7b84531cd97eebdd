//! Typed partial updates for stages and tasks
//!
//! An update names a subset of a fixed field set. Payloads are JSON objects;
//! any key outside the allowed set is rejected with
//! [`UpdateError::UnknownField`] instead of being ignored.
//!
//! ```rust
//! use planxl_core::{Stage, StageUpdate, Status};
//!
//! let mut stage = Stage::new(1, "Alpha");
//! let update = StageUpdate::from_json(r#"{"status": "completed", "progress": 100}"#).unwrap();
//! update.apply(&mut stage);
//!
//! assert_eq!(stage.status, Status::Completed);
//! assert!(StageUpdate::from_json(r#"{"colour": "red"}"#).is_err());
//! ```

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{Priority, Stage, Status, Task};

/// Fields that can be changed through a partial update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateField {
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    Priority,
    Progress,
}

impl UpdateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateField::Name => "name",
            UpdateField::Description => "description",
            UpdateField::StartDate => "start_date",
            UpdateField::EndDate => "end_date",
            UpdateField::Status => "status",
            UpdateField::Priority => "priority",
            UpdateField::Progress => "progress",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(UpdateField::Name),
            "description" => Some(UpdateField::Description),
            "start_date" => Some(UpdateField::StartDate),
            "end_date" => Some(UpdateField::EndDate),
            "status" => Some(UpdateField::Status),
            "priority" => Some(UpdateField::Priority),
            "progress" => Some(UpdateField::Progress),
            _ => None,
        }
    }
}

/// Update rejection
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Progress out of range (0-100): {0}")]
    ProgressOutOfRange(f64),

    #[error("Update payload must be a JSON object")]
    NotAnObject,

    #[error("Invalid update: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Partial update of a stage
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub progress: Option<f64>,
}

impl StageUpdate {
    pub const FIELDS: &'static [UpdateField] = &[
        UpdateField::Name,
        UpdateField::Description,
        UpdateField::StartDate,
        UpdateField::EndDate,
        UpdateField::Status,
        UpdateField::Progress,
    ];

    /// Parse and validate a JSON payload
    pub fn from_json(payload: &str) -> Result<Self, UpdateError> {
        let value = check_keys(payload, Self::FIELDS)?;
        let update: Self = serde_json::from_value(value)?;
        check_progress(update.progress)?;
        Ok(update)
    }

    /// Fields carried by this update
    pub fn fields(&self) -> Vec<UpdateField> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(UpdateField::Name);
        }
        if self.description.is_some() {
            fields.push(UpdateField::Description);
        }
        if self.start_date.is_some() {
            fields.push(UpdateField::StartDate);
        }
        if self.end_date.is_some() {
            fields.push(UpdateField::EndDate);
        }
        if self.status.is_some() {
            fields.push(UpdateField::Status);
        }
        if self.progress.is_some() {
            fields.push(UpdateField::Progress);
        }
        fields
    }

    /// Write the carried fields into `stage`
    pub fn apply(self, stage: &mut Stage) {
        if let Some(name) = self.name {
            stage.name = name;
        }
        if let Some(description) = self.description {
            stage.description = description;
        }
        if let Some(start) = self.start_date {
            stage.start_date = Some(start);
        }
        if let Some(end) = self.end_date {
            stage.end_date = Some(end);
        }
        if let Some(status) = self.status {
            stage.status = status;
        }
        if let Some(progress) = self.progress {
            stage.progress = progress;
        }
    }
}

/// Partial update of a task
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub progress: Option<f64>,
}

impl TaskUpdate {
    pub const FIELDS: &'static [UpdateField] = &[
        UpdateField::Name,
        UpdateField::Description,
        UpdateField::StartDate,
        UpdateField::EndDate,
        UpdateField::Status,
        UpdateField::Priority,
        UpdateField::Progress,
    ];

    /// Parse and validate a JSON payload
    pub fn from_json(payload: &str) -> Result<Self, UpdateError> {
        let value = check_keys(payload, Self::FIELDS)?;
        let update: Self = serde_json::from_value(value)?;
        check_progress(update.progress)?;
        Ok(update)
    }

    /// Fields carried by this update
    pub fn fields(&self) -> Vec<UpdateField> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(UpdateField::Name);
        }
        if self.description.is_some() {
            fields.push(UpdateField::Description);
        }
        if self.start_date.is_some() {
            fields.push(UpdateField::StartDate);
        }
        if self.end_date.is_some() {
            fields.push(UpdateField::EndDate);
        }
        if self.status.is_some() {
            fields.push(UpdateField::Status);
        }
        if self.priority.is_some() {
            fields.push(UpdateField::Priority);
        }
        if self.progress.is_some() {
            fields.push(UpdateField::Progress);
        }
        fields
    }

    /// Write the carried fields into `task`
    pub fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(start) = self.start_date {
            task.start_date = Some(start);
        }
        if let Some(end) = self.end_date {
            task.end_date = Some(end);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(progress) = self.progress {
            task.progress = progress;
        }
    }
}

fn check_keys(payload: &str, allowed: &[UpdateField]) -> Result<serde_json::Value, UpdateError> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(UpdateError::NotAnObject)?;
    for key in object.keys() {
        match UpdateField::from_key(key) {
            Some(field) if allowed.contains(&field) => {}
            _ => return Err(UpdateError::UnknownField(key.clone())),
        }
    }
    Ok(value)
}

fn check_progress(progress: Option<f64>) -> Result<(), UpdateError> {
    match progress {
        Some(p) if !(0.0..=100.0).contains(&p) => Err(UpdateError::ProgressOutOfRange(p)),
        _ => Ok(()),
    }
}
