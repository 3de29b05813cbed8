//! In-memory task store shared by the task tools
//!
//! The store is append-only: tasks are never edited, removed or reordered.
//! Cloning a `TaskStore` yields another handle onto the same list, so the
//! pipeline can own the store and hand clones to every tool context.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Listing returned when no task has been created yet
pub const EMPTY_TASKS_MESSAGE: &str = "No tasks registered.";

/// A task created through the task tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task, trimming both fields
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Format for a numbered listing (1-based position)
    pub fn format_line(&self, position: usize) -> String {
        format!("{}. {} - {}", position, self.title, self.description)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    inner: Arc<RwLock<Vec<Task>>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return a copy of what was stored
    pub fn add(&self, title: &str, description: &str) -> Task {
        let task = Task::new(title, description);
        let mut tasks = self.inner.write();
        tasks.push(task.clone());
        log::info!(
            "[TASKS] Added task #{} '{}' at {}",
            tasks.len(),
            task.title,
            task.created_at.to_rfc3339()
        );
        task
    }

    /// Snapshot of all tasks in insertion order
    #[cfg(test)]
    pub fn all(&self) -> Vec<Task> {
        self.inner.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Numbered listing of every task, or the empty-state message
    pub fn format_listing(&self) -> String {
        let tasks = self.inner.read();
        if tasks.is_empty() {
            return EMPTY_TASKS_MESSAGE.to_string();
        }

        let mut out = String::from("Current tasks:\n");
        for (i, task) in tasks.iter().enumerate() {
            out.push_str(&task.format_line(i + 1));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_fields() {
        let store = TaskStore::new();
        let task = store.add("  Fix login ", " Button unresponsive  ");
        assert_eq!(task.title, "Fix login");
        assert_eq!(task.description, "Button unresponsive");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_listing_order_and_format() {
        let store = TaskStore::new();
        store.add("Fix login", "Button unresponsive");
        store.add("Deploy", "");

        let listing = store.format_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Current tasks:");
        assert_eq!(lines[1], "1. Fix login - Button unresponsive");
        assert_eq!(lines[2], "2. Deploy - ");
    }

    #[test]
    fn test_empty_listing() {
        let store = TaskStore::new();
        assert_eq!(store.len(), 0);
        assert_eq!(store.format_listing(), EMPTY_TASKS_MESSAGE);
    }

    #[test]
    fn test_clone_shares_state() {
        let store1 = TaskStore::new();
        let store2 = store1.clone();

        store1.add("shared", "data");

        assert_eq!(store2.len(), 1);
        assert_eq!(store2.all()[0].title, "shared");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let store = TaskStore::new();
        store.add("Same", "task");
        store.add("Same", "task");
        assert_eq!(store.len(), 2);
    }
}
