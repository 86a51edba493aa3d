use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;
use crate::core::filters::TaskFilters;
use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed persistence for the two store documents: the task array
/// and the filter record. Loads never fail: an absent or malformed
/// document degrades to the empty/default value. Saves rewrite the
/// whole document and report failures for the caller to swallow.
pub struct JsonStorage {
    tasks_path: PathBuf,
    filters_path: PathBuf,
}

impl JsonStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            tasks_path: config.tasks_path(),
            filters_path: config.filters_path(),
        }
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        match std::fs::read_to_string(&self.tasks_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!(
                    "Malformed task document at {}, starting empty: {}",
                    self.tasks_path.display(),
                    e
                );
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_document(&self.tasks_path, &json)
    }

    pub fn load_filters(&self) -> TaskFilters {
        match std::fs::read_to_string(&self.filters_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!(
                    "Malformed filter document at {}, using defaults: {}",
                    self.filters_path.display(),
                    e
                );
                TaskFilters::default()
            }),
            Err(_) => TaskFilters::default(),
        }
    }

    pub fn save_filters(&self, filters: &TaskFilters) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(filters)?;
        self.write_document(&self.filters_path, &json)
    }

    fn write_document(&self, path: &std::path::Path, json: &str) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
