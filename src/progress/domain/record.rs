//! Per-user task records and partial updates.

use super::{SubtaskProgress, TaskMetadata, TaskStatus, UserId};
use crate::catalog::domain::{PhaseId, TaskId, TaskModule};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task definition carried by a record that has no catalog counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicTaskFields {
    /// Display title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Life area, when known.
    #[serde(default)]
    pub module: Option<TaskModule>,
    /// Journey phase, when known.
    #[serde(default)]
    pub phase: Option<PhaseId>,
    /// Whether the task was generated for the user rather than typed in.
    #[serde(default)]
    pub is_system_generated: bool,
}

impl DynamicTaskFields {
    /// Returns whether the fields describe a usable task.
    ///
    /// Both title and description must be non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// A user's progress on one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTaskRecord {
    user_id: UserId,
    task_id: TaskId,
    status: TaskStatus,
    notes: Option<String>,
    custom_due_date: Option<NaiveDate>,
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    subtask_progress: SubtaskProgress,
    #[serde(default)]
    metadata: TaskMetadata,
    #[serde(default)]
    dynamic: Option<DynamicTaskFields>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserTaskRecord {
    /// Creates a fresh `todo` record with empty progress.
    #[must_use]
    pub fn new(user_id: UserId, task_id: TaskId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            task_id,
            status: TaskStatus::Todo,
            notes: None,
            custom_due_date: None,
            completed_at: None,
            subtask_progress: SubtaskProgress::new(),
            metadata: TaskMetadata::new(),
            dynamic: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the task the record tracks.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the free-text notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns whether the notes contain anything besides whitespace.
    #[must_use]
    pub fn has_notes(&self) -> bool {
        self.notes().is_some_and(|notes| !notes.trim().is_empty())
    }

    /// Returns the user-chosen due date.
    #[must_use]
    pub const fn custom_due_date(&self) -> Option<NaiveDate> {
        self.custom_due_date
    }

    /// Returns when the task was completed, while it is `done`.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the simple-subtask checkbox state.
    #[must_use]
    pub const fn subtask_progress(&self) -> &SubtaskProgress {
        &self.subtask_progress
    }

    /// Returns the metadata buckets.
    #[must_use]
    pub const fn metadata(&self) -> &TaskMetadata {
        &self.metadata
    }

    /// Returns the dynamic task definition, if the record carries one.
    #[must_use]
    pub const fn dynamic(&self) -> Option<&DynamicTaskFields> {
        self.dynamic.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update, leaving absent fields untouched.
    pub fn apply(&mut self, update: RecordUpdate, now: DateTime<Utc>) {
        let RecordUpdate {
            status,
            notes,
            custom_due_date,
            completed_at,
            subtask_progress,
            metadata,
            dynamic,
        } = update;

        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = notes {
            self.notes = Some(value);
        }
        if let Some(value) = custom_due_date {
            self.custom_due_date = value;
        }
        if let Some(value) = completed_at {
            self.completed_at = value;
        }
        if let Some(value) = subtask_progress {
            self.subtask_progress = value;
        }
        if let Some(value) = metadata {
            self.metadata = value;
        }
        if let Some(value) = dynamic {
            self.dynamic = Some(value);
        }
        self.updated_at = now;
    }
}

/// Partial update of a [`UserTaskRecord`].
///
/// `None` leaves a field unchanged. Nullable fields use a nested option so
/// that clearing (`Some(None)`) is distinct from not touching (`None`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    /// New lifecycle status.
    pub status: Option<TaskStatus>,
    /// New notes.
    pub notes: Option<String>,
    /// New or cleared due date.
    pub custom_due_date: Option<Option<NaiveDate>>,
    /// New or cleared completion timestamp.
    pub completed_at: Option<Option<DateTime<Utc>>>,
    /// Replacement checkbox map.
    pub subtask_progress: Option<SubtaskProgress>,
    /// Replacement metadata map.
    pub metadata: Option<TaskMetadata>,
    /// Dynamic task definition to attach.
    pub dynamic: Option<DynamicTaskFields>,
}

impl RecordUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the completion timestamp, or clears it with `None`.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Attaches a dynamic task definition.
    #[must_use]
    pub fn with_dynamic(mut self, dynamic: DynamicTaskFields) -> Self {
        self.dynamic = Some(dynamic);
        self
    }
}
