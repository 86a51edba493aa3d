use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::storage::JsonStorage;

use super::filters::TaskFilters;
use super::task::{Priority, Task};

/// Field updates applied by `TaskStore::update`. Outer `None` leaves a
/// field unchanged; for the clearable fields an inner `None` clears the
/// value. `id` and `created_at` are not representable here and so
/// cannot be altered through an update.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_time: Option<Option<NaiveTime>>,
    pub completed: Option<bool>,
}

/// Sole owner and writer of the task collection. Every successful
/// mutation stamps `updated_at` and mirrors the whole collection to
/// storage; a failed save is logged and swallowed so the in-memory
/// state keeps working.
pub struct TaskStore {
    tasks: Vec<Task>,
    filters: TaskFilters,
    storage: JsonStorage,
}

impl TaskStore {
    pub fn load(storage: JsonStorage) -> Self {
        let tasks = storage.load_tasks();
        let filters = storage.load_filters();
        Self {
            tasks,
            filters,
            storage,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.filters
    }

    /// Append a new task. Returns None without touching the collection
    /// when the trimmed title is empty.
    pub fn add(
        &mut self,
        title: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
        description: Option<String>,
    ) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let mut task = Task::new(title);
        task.priority = priority;
        task.due_date = due_date;
        task.due_time = due_time;
        task.description = description;
        self.tasks.push(task);
        self.persist_tasks();
        self.tasks.last()
    }

    /// Merge a patch into the matching task and bump `updated_at`.
    /// No-op on an unknown id, or when the patch carries an
    /// empty-after-trim title.
    pub fn update(&mut self, id: Uuid, patch: TaskPatch) {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return;
            }
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(due_time) = patch.due_time {
            task.due_time = due_time;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = chrono::Local::now().naive_local();
        self.persist_tasks();
    }

    /// Flip completion state. No-op on an unknown id.
    pub fn toggle_complete(&mut self, id: Uuid) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.completed = !task.completed;
        task.updated_at = chrono::Local::now().naive_local();
        self.persist_tasks();
    }

    /// Remove the task with this id. No-op when absent.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist_tasks();
        }
    }

    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.persist_tasks();
    }

    /// Drop every completed task, keeping the remainder in order.
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.completed);
        self.persist_tasks();
    }

    pub fn set_filters(&mut self, filters: TaskFilters) {
        self.filters = filters;
        if let Err(e) = self.storage.save_filters(&self.filters) {
            log::warn!("Failed to save filters: {}", e);
        }
    }

    fn persist_tasks(&self) {
        if let Err(e) = self.storage.save_tasks(&self.tasks) {
            log::warn!("Failed to save tasks: {}", e);
        }
    }
}
