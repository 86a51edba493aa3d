use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TASKS_FILE: &str = "tasks.json";
const FILTERS_FILE: &str = "filters.json";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("wick")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub data_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
        }
    }
}

impl Config {
    pub fn tasks_path(&self) -> PathBuf {
        self.data_directory.join(TASKS_FILE)
    }

    pub fn filters_path(&self) -> PathBuf {
        self.data_directory.join(FILTERS_FILE)
    }

    /// Ensure the data directory exists.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_paths_live_under_the_data_directory() {
        let config = Config {
            data_directory: PathBuf::from("/tmp/wick-test"),
        };
        assert_eq!(config.tasks_path(), PathBuf::from("/tmp/wick-test/tasks.json"));
        assert_eq!(
            config.filters_path(),
            PathBuf::from("/tmp/wick-test/filters.json")
        );
    }

    #[test]
    fn default_directory_ends_with_app_name() {
        let config = Config::default();
        assert!(config.data_directory.ends_with("wick"));
    }

    #[test]
    fn ensure_dir_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_directory: dir.path().join("fresh"),
        };
        config.ensure_dir().unwrap();
        assert!(config.data_directory.is_dir());
    }
}
