//! Read-only filtered and sorted views over the task collection.
//!
//! The board renders from a derived view; the underlying task order in the
//! store is never mutated. Filters narrow first, then the sort runs over
//! the survivors.

use std::cmp::Ordering;

use crate::task::{Task, TaskPriority, TaskStatus};

/// Sort applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Due date ascending; tasks without a due date sort last.
    DueDate,
    /// Priority weight (High=3, Medium=2, Low=1).
    Priority { ascending: bool },
}

/// Composable filter + sort over tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    pub priority: Option<TaskPriority>,
    pub sort: Option<SortKey>,
}

impl TaskQuery {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.priority.is_none() && self.sort.is_none()
    }

    fn matches(&self, task: &Task) -> bool {
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() {
                let in_title = task.title.to_lowercase().contains(&needle);
                let in_description = task.description.to_lowercase().contains(&needle);
                if !in_title && !in_description {
                    return false;
                }
            }
        }
        true
    }
}

/// Indices into `tasks` of the matches, in view order.
pub fn filter_task_indices(tasks: &[Task], query: &TaskQuery) -> Vec<usize> {
    let mut indices: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| query.matches(task))
        .map(|(idx, _)| idx)
        .collect();

    if let Some(sort) = query.sort {
        indices.sort_by(|&a, &b| compare_tasks(&tasks[a], &tasks[b], sort));
    }
    indices
}

/// Matches for one board column, in view order.
pub fn column_indices(tasks: &[Task], status: TaskStatus, query: &TaskQuery) -> Vec<usize> {
    filter_task_indices(tasks, query)
        .into_iter()
        .filter(|&idx| tasks[idx].status == status)
        .collect()
}

fn compare_tasks(a: &Task, b: &Task, sort: SortKey) -> Ordering {
    match sort {
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        },
        SortKey::Priority { ascending } => {
            let ordering = a.priority.weight().cmp(&b.priority.weight());
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}
