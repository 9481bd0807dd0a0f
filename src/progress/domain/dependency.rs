//! Dependency resolution against a user's task records.

use super::UserTaskRecord;
use crate::catalog::domain::{Catalog, Task, TaskId};
use std::collections::HashMap;

/// Blocking state of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCheck {
    /// Whether every dependency is done.
    pub can_complete: bool,
    /// Dependencies that are not done yet, in declared order.
    pub blocked_by: Vec<Task>,
}

/// Reports which dependencies of `task` the user has not finished.
///
/// A dependency blocks when its catalog task exists and the user's record
/// for it is missing or not `done`. This only reports; nothing prevents a
/// blocked task from being marked done.
#[must_use]
pub fn check_dependencies(
    task: &Task,
    catalog: &Catalog,
    records: &[UserTaskRecord],
) -> DependencyCheck {
    if task.dependencies().is_empty() {
        return DependencyCheck {
            can_complete: true,
            blocked_by: Vec::new(),
        };
    }

    let by_task: HashMap<&TaskId, &UserTaskRecord> = records
        .iter()
        .map(|record| (record.task_id(), record))
        .collect();

    let blocked_by: Vec<Task> = task
        .dependencies()
        .iter()
        .filter_map(|dependency| catalog.get(dependency))
        .filter(|dependency| {
            by_task
                .get(dependency.id())
                .is_none_or(|record| !record.status().is_done())
        })
        .cloned()
        .collect();

    DependencyCheck {
        can_complete: blocked_by.is_empty(),
        blocked_by,
    }
}
