//! Project snapshots read from JSON files

use std::path::{Path, PathBuf};

use planxl_core::{ProjectId, ProjectSnapshot, SnapshotSource, SourceError};
use serde::Deserialize;

/// A JSON file holding one snapshot or an array of snapshots
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(Vec<ProjectSnapshot>),
    One(Box<ProjectSnapshot>),
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every snapshot in the file, in file order
    pub fn read_all(&self) -> Result<Vec<ProjectSnapshot>, SourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            SourceError::Unreadable(format!("{}: {e}", self.path.display()))
        })?;
        let file: SnapshotFile = serde_json::from_str(&text).map_err(|e| {
            SourceError::Unreadable(format!("{}: {e}", self.path.display()))
        })?;
        Ok(match file {
            SnapshotFile::Many(projects) => projects,
            SnapshotFile::One(project) => vec![*project],
        })
    }
}

impl SnapshotSource for JsonFileSource {
    fn load(&self, id: ProjectId) -> Result<ProjectSnapshot, SourceError> {
        self.read_all()?
            .into_iter()
            .find(|project| project.id == id)
            .ok_or(SourceError::NotFound(id))
    }
}
