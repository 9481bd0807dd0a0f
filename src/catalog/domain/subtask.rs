//! Subtask definitions attached to catalog tasks.

use super::{SubtaskId, TaskId};
use serde::{Deserialize, Serialize};

/// How a subtask's completion is observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubtaskKind {
    /// A checkbox tracked in the record's subtask progress map.
    Simple,
    /// Complete when another task reaches `done`.
    LinkedTask {
        /// Task whose completion satisfies this subtask.
        linked_task_id: TaskId,
    },
    /// Complete when every listed field of a criteria bucket is filled in.
    FormCriteria {
        /// Metadata bucket holding the form answers.
        criteria_key: String,
        /// Field names that must all be present and non-empty.
        fields: Vec<String>,
    },
    /// Complete when any provider in an action bucket is marked done.
    ExternalAction {
        /// Metadata bucket holding per-provider progress.
        action_type: String,
        /// Providers the user can complete the action with.
        #[serde(default)]
        providers: Vec<String>,
    },
}

impl SubtaskKind {
    /// Returns the serialized discriminator of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::LinkedTask { .. } => "linked_task",
            Self::FormCriteria { .. } => "form_criteria",
            Self::ExternalAction { .. } => "external_action",
        }
    }
}

/// A typed sub-unit of a catalog task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    #[serde(default)]
    required: bool,
    #[serde(flatten)]
    kind: SubtaskKind,
}

impl Subtask {
    /// Creates an optional subtask of the given kind.
    #[must_use]
    pub fn new(id: SubtaskId, title: impl Into<String>, kind: SubtaskKind) -> Self {
        Self {
            id,
            title: title.into(),
            required: false,
            kind,
        }
    }

    /// Marks the subtask as gating automatic completion of its task.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> &SubtaskId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask gates automatic completion.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the completion kind.
    #[must_use]
    pub const fn kind(&self) -> &SubtaskKind {
        &self.kind
    }

    /// Returns the linked task when this is a linked-task subtask.
    #[must_use]
    pub const fn linked_task_id(&self) -> Option<&TaskId> {
        match &self.kind {
            SubtaskKind::LinkedTask { linked_task_id } => Some(linked_task_id),
            SubtaskKind::Simple
            | SubtaskKind::FormCriteria { .. }
            | SubtaskKind::ExternalAction { .. } => None,
        }
    }

    pub(crate) fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }
}
