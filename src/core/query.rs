use std::cmp::Ordering;

use chrono::NaiveDateTime;

use super::filters::{SortBy, TaskFilters};
use super::task::{Priority, Task};

/// Aggregate counters over the whole collection, recomputed on every
/// build. Overdue and completion rate are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub high_priority: usize,
    /// Percentage of tasks completed, rounded; 0 for an empty collection.
    pub completion_rate: u32,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: NaiveDateTime) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();
        let high_priority = tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count();
        let completion_rate = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total,
            completed,
            pending: total - completed,
            overdue,
            high_priority,
            completion_rate,
        }
    }
}

/// The display projection: tasks matching the filters in display order,
/// plus stats over the unfiltered collection.
#[derive(Debug, Clone)]
pub struct TaskView {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
}

impl TaskView {
    pub fn build(tasks: &[Task], filters: &TaskFilters, now: NaiveDateTime) -> Self {
        let needle = filters.search.to_lowercase();
        let mut visible: Vec<Task> = tasks
            .iter()
            .filter(|t| needle.is_empty() || matches_search(t, &needle))
            .filter(|t| filters.show_completed || !t.completed)
            .cloned()
            .collect();

        // Stable sort: completed tasks always after incomplete ones,
        // then the requested key within each group. Ties keep insertion
        // order.
        visible.sort_by(|a, b| {
            match a.completed.cmp(&b.completed) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
            match filters.sort_by {
                SortBy::Priority => b.priority.weight().cmp(&a.priority.weight()),
                SortBy::DueDate => match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
                SortBy::CreatedAt => b.created_at.cmp(&a.created_at),
                SortBy::Completed => Ordering::Equal,
            }
        });

        Self {
            tasks: visible,
            stats: TaskStats::compute(tasks, now),
        }
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
