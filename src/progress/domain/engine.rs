//! Automatic status derivation from subtask signals.
//!
//! The engine is a pure function of the current status, the task's subtask
//! definitions and the observed signals. It never fails: anything it cannot
//! interpret counts as "not satisfied" and leaves the status unchanged.

use super::{SubtaskProgress, TaskMetadata, TaskStatus};
use crate::catalog::domain::{Subtask, SubtaskId, SubtaskKind, Task};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Completion of linked-task subtasks, keyed by subtask id.
///
/// A value is `true` when the linked task's record is `done`.
pub type LinkedTaskCompletion = BTreeMap<SubtaskId, bool>;

/// Everything the engine observes about a task's progress.
#[derive(Debug, Clone, Copy)]
pub struct StatusSignals<'a> {
    /// Simple-subtask checkbox state.
    pub subtask_progress: &'a SubtaskProgress,
    /// Linked-task completion per linked subtask.
    pub linked_tasks: &'a LinkedTaskCompletion,
    /// Whether the record has non-blank notes.
    pub has_notes: bool,
    /// Whether documents are attached to the task.
    pub has_documents: bool,
    /// Criteria and action buckets.
    pub metadata: &'a TaskMetadata,
}

impl StatusSignals<'_> {
    /// Returns whether any signal shows the user has started the task.
    #[must_use]
    pub fn shows_activity(&self) -> bool {
        self.subtask_progress.any_checked()
            || self.linked_tasks.values().any(|done| *done)
            || self.has_notes
            || self.has_documents
            || !self.metadata.is_empty()
    }
}

/// Returns whether one subtask is satisfied by the signals.
#[must_use]
pub fn is_subtask_satisfied(subtask: &Subtask, signals: &StatusSignals<'_>) -> bool {
    match subtask.kind() {
        SubtaskKind::Simple => signals.subtask_progress.is_checked(subtask.id()),
        SubtaskKind::LinkedTask { .. } => signals
            .linked_tasks
            .get(subtask.id())
            .copied()
            .unwrap_or(false),
        SubtaskKind::FormCriteria {
            criteria_key,
            fields,
        } => signals.metadata.criteria_complete(criteria_key, fields),
        SubtaskKind::ExternalAction { action_type, .. } => {
            signals.metadata.any_provider_complete(action_type)
        }
    }
}

/// Derives the status a task should move to after its signals changed.
///
/// Rules, applied in order; the first one that fires decides:
///
/// 1. `todo` becomes `in_progress` once any signal shows activity.
/// 2. Any status other than `done` becomes `done` when the task has at
///    least one required subtask and all of them are satisfied.
/// 3. Otherwise the status is unchanged; in particular `done` never reverts
///    and `blocked` is never entered.
///
/// Satisfied requirements always show activity, so a `todo` task passes
/// through `in_progress` and needs a second update to reach `done`.
///
/// `task` is `None` for records without a catalog definition, which can
/// only make the first rule fire.
#[must_use]
pub fn derive_status(
    current: TaskStatus,
    task: Option<&Task>,
    signals: &StatusSignals<'_>,
) -> TaskStatus {
    if current.is_done() {
        return current;
    }
    if current == TaskStatus::Todo && signals.shows_activity() {
        return TaskStatus::InProgress;
    }
    if task.is_some_and(|definition| all_required_satisfied(definition, signals)) {
        return TaskStatus::Done;
    }
    current
}

fn all_required_satisfied(task: &Task, signals: &StatusSignals<'_>) -> bool {
    let mut required = task.required_subtasks().peekable();
    if required.peek().is_none() {
        return false;
    }
    required.all(|subtask| is_subtask_satisfied(subtask, signals))
}

/// Computes the completion timestamp for a status change.
///
/// Entering `done` stamps `now` unless a stamp already exists; any other
/// status clears it.
#[must_use]
pub fn completion_timestamp(
    status: TaskStatus,
    previous: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if status.is_done() {
        Some(previous.unwrap_or(now))
    } else {
        None
    }
}
