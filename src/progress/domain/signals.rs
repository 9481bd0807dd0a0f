//! Progress signals stored on a user's task record.
//!
//! Two maps carry subtask state: a checkbox map keyed by subtask id, and an
//! open-ended metadata map whose top-level keys are buckets written by
//! criteria forms and external-action widgets. Bucket shapes are not
//! enforced; readers treat anything unexpected as "not satisfied".

use crate::catalog::domain::SubtaskId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Checkbox state per simple subtask.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskProgress(BTreeMap<SubtaskId, bool>);

impl SubtaskProgress {
    /// Creates an empty progress map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the checkbox state of a subtask.
    #[must_use]
    pub fn with(mut self, id: SubtaskId, checked: bool) -> Self {
        self.set(id, checked);
        self
    }

    /// Sets the checkbox state of a subtask in place.
    pub fn set(&mut self, id: SubtaskId, checked: bool) {
        self.0.insert(id, checked);
    }

    /// Returns whether the subtask is checked. Unknown ids are unchecked.
    #[must_use]
    pub fn is_checked(&self, id: &SubtaskId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Returns whether any subtask is checked.
    #[must_use]
    pub fn any_checked(&self) -> bool {
        self.0.values().any(|checked| *checked)
    }

    /// Returns whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SubtaskId, bool)> for SubtaskProgress {
    fn from_iter<I: IntoIterator<Item = (SubtaskId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Open-ended metadata buckets attached to a task record.
///
/// Criteria buckets map field names to answers
/// (`{"housing_criteria": {"budget": 900}}`); action buckets map provider
/// ids to completion flags (`{"platform_signup": {"wg_gesucht": true}}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskMetadata(Map<String, Value>);

impl TaskMetadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a top-level bucket.
    #[must_use]
    pub fn with_bucket(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns a top-level bucket.
    #[must_use]
    pub fn bucket(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns whether no bucket is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with `updates` applied bucket by bucket.
    ///
    /// Buckets in `updates` replace buckets of the same key wholesale;
    /// nested values are not merged.
    #[must_use]
    pub fn merged(&self, updates: &Self) -> Self {
        let mut combined = self.0.clone();
        for (key, value) in &updates.0 {
            combined.insert(key.clone(), value.clone());
        }
        Self(combined)
    }

    /// Returns whether every listed field of a criteria bucket is filled in.
    ///
    /// A missing or non-object bucket is never complete. A field counts as
    /// filled in when it is present, not `null`, and not an empty string,
    /// array or object.
    #[must_use]
    pub fn criteria_complete(&self, criteria_key: &str, fields: &[String]) -> bool {
        let Some(Value::Object(answers)) = self.bucket(criteria_key) else {
            return false;
        };
        fields
            .iter()
            .all(|field| answers.get(field).is_some_and(is_filled_in))
    }

    /// Returns whether any provider of an action bucket is marked `true`.
    ///
    /// Only the JSON literal `true` counts; a missing or non-object bucket
    /// is never complete.
    #[must_use]
    pub fn any_provider_complete(&self, action_type: &str) -> bool {
        let Some(Value::Object(providers)) = self.bucket(action_type) else {
            return false;
        };
        providers.values().any(|done| *done == Value::Bool(true))
    }
}

impl From<Map<String, Value>> for TaskMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_filled_in(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}
