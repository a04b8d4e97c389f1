use anyhow::{bail, Context, Result};
use serde_json::value::RawValue;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Task;

/// Supplies task snapshots for scoring.
///
/// Implementations hand back fresh records on every call; nothing is cached
/// between scoring passes.
pub trait TaskSource {
    fn load_tasks(&self) -> Result<Vec<Task>>;
}

/// Default task file path (`tasks.json` in the working directory)
pub fn default_tasks_path() -> PathBuf {
    PathBuf::from("tasks.json")
}

/// Reads a JSON array of task records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskSource for JsonFileSource {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read task file at {}", self.path.display()))?;

        let records: Vec<Box<RawValue>> = serde_json::from_str(&content).with_context(|| {
            format!(
                "Failed to parse tasks: expected a JSON array of objects in {}",
                self.path.display()
            )
        })?;

        let tasks = records
            .iter()
            .enumerate()
            .map(|(idx, record)| parse_record(&self.path, idx, record))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = tasks.len(), path = %self.path.display(), "loaded tasks");
        Ok(tasks)
    }
}

/// Parse one task record. Only JSON objects are records; bad fields inside
/// an object are absorbed by `Task`.
fn parse_record(path: &Path, idx: usize, record: &RawValue) -> Result<Task> {
    if !record.get().starts_with('{') {
        bail!(
            "Failed to parse tasks: record {} in {} is not a JSON object",
            idx + 1,
            path.display()
        );
    }
    serde_json::from_str(record.get()).with_context(|| {
        format!(
            "Failed to parse tasks: record {} in {}",
            idx + 1,
            path.display()
        )
    })
}
