//! Locale text overlays and the field-level merge onto a base catalog.

use super::{Catalog, SubtaskId, Task, TaskId, TranslatedText};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replacement text for one subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskOverlay {
    /// Subtask the replacement applies to.
    pub id: SubtaskId,
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Replacement text for one task.
///
/// Only translatable fields can be supplied; structural fields are not part
/// of the overlay shape at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOverlay {
    /// Task the replacement applies to.
    pub id: TaskId,
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement city note.
    #[serde(default)]
    pub city_note: Option<String>,
    /// Replacement subtask titles.
    #[serde(default)]
    pub subtasks: Vec<SubtaskOverlay>,
}

impl TaskOverlay {
    /// Creates an empty overlay entry for a task.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            city_note: None,
            subtasks: Vec::new(),
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement city note.
    #[must_use]
    pub fn with_city_note(mut self, note: impl Into<String>) -> Self {
        self.city_note = Some(note.into());
        self
    }

    /// Adds a replacement subtask title.
    #[must_use]
    pub fn with_subtask_title(mut self, id: SubtaskId, title: impl Into<String>) -> Self {
        self.subtasks.push(SubtaskOverlay {
            id,
            title: Some(title.into()),
        });
        self
    }
}

/// Sparse per-locale text replacements for a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleOverlay {
    entries: Vec<TaskOverlay>,
}

impl LocaleOverlay {
    /// Creates an overlay from its entries.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = TaskOverlay>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the overlay entries.
    #[must_use]
    pub fn entries(&self) -> &[TaskOverlay] {
        &self.entries
    }

    /// Returns whether the overlay supplies no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Applies a locale overlay to a base catalog.
///
/// Each translatable field takes the overlay value when it is present and
/// non-empty, and keeps the base value otherwise. Overlay entries for tasks
/// or subtasks the base does not know are ignored. When an overlay repeats
/// a task, the last entry wins.
#[must_use]
pub fn merge_overlay(base: &Catalog, overlay: &LocaleOverlay) -> Catalog {
    let by_task: HashMap<&TaskId, &TaskOverlay> = overlay
        .entries()
        .iter()
        .map(|entry| (&entry.id, entry))
        .collect();

    base.map_tasks(|task| {
        by_task
            .get(task.id())
            .map_or_else(|| task.clone(), |entry| translate(task, entry))
    })
}

fn translate(task: &Task, entry: &TaskOverlay) -> Task {
    let subtask_titles: HashMap<&SubtaskId, &str> = entry
        .subtasks
        .iter()
        .filter_map(|subtask| {
            non_empty(subtask.title.as_deref()).map(|title| (&subtask.id, title))
        })
        .collect();

    let subtasks = task
        .subtasks()
        .iter()
        .map(|subtask| {
            subtask_titles.get(subtask.id()).map_or_else(
                || subtask.clone(),
                |title| subtask.clone().with_title((*title).to_owned()),
            )
        })
        .collect();

    let text = TranslatedText {
        title: pick(entry.title.as_deref(), task.title()),
        description: pick(entry.description.as_deref(), task.description()),
        city_note: non_empty(entry.city_note.as_deref())
            .or_else(|| task.city_note())
            .map(str::to_owned),
        subtasks,
    };
    task.clone().into_translated(text)
}

fn pick(overlay: Option<&str>, base: &str) -> String {
    non_empty(overlay).unwrap_or(base).to_owned()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
