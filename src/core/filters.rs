use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Priority,
    DueDate,
    CreatedAt,
    Completed,
}

impl Default for SortBy {
    fn default() -> Self {
        Self::Priority
    }
}

/// View parameters the user controls, persisted independently of the
/// tasks themselves. Absent or partial stored records fall back to the
/// defaults field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilters {
    pub search: String,
    pub sort_by: SortBy,
    pub show_completed: bool,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_by: SortBy::default(),
            show_completed: true,
        }
    }
}
