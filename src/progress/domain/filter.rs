//! Visible-task filtering over catalog and dynamic tasks.

use super::{TaskStatus, UserTaskRecord};
use crate::catalog::domain::{
    Catalog, CityId, Importance, Locale, PersonaId, PhaseId, Task, TaskDefinition, TaskId,
    TaskModule,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Restrictions applied when listing tasks.
///
/// Every field is optional; an absent field places no restriction on its
/// axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilter {
    /// Only tasks in scope for this city.
    pub city: Option<CityId>,
    /// Only tasks scheduled in this phase.
    pub phase: Option<PhaseId>,
    /// Only tasks of this module.
    pub module: Option<TaskModule>,
    /// Only tasks of this importance.
    pub importance: Option<Importance>,
    /// Only tasks offered to this persona.
    pub persona: Option<PersonaId>,
    /// Case-insensitive text that must appear in the title or description.
    pub search: Option<String>,
    /// Locale to render catalog text in.
    pub locale: Option<Locale>,
    /// Only records in this status are attached.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Creates a filter with no restrictions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a city.
    #[must_use]
    pub fn with_city(mut self, city: CityId) -> Self {
        self.city = Some(city);
        self
    }

    /// Restricts to a phase.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Restricts to a module.
    #[must_use]
    pub const fn with_module(mut self, module: TaskModule) -> Self {
        self.module = Some(module);
        self
    }

    /// Restricts to an importance tier.
    #[must_use]
    pub const fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Restricts to a persona.
    #[must_use]
    pub fn with_persona(mut self, persona: PersonaId) -> Self {
        self.persona = Some(persona);
        self
    }

    /// Restricts to tasks mentioning `search`.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Renders catalog text in `locale`.
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Attaches only records in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_catalog_task(&self, task: &Task, needle: Option<&str>) -> bool {
        self.city.as_ref().is_none_or(|city| task.applies_to_city(city))
            && self.phase.as_ref().is_none_or(|phase| task.phase() == phase)
            && self.module.is_none_or(|module| task.module() == module)
            && self
                .importance
                .is_none_or(|importance| task.importance() == importance)
            && self
                .persona
                .as_ref()
                .is_none_or(|persona| task.applies_to_persona(persona))
            && needle.is_none_or(|text| mentions(task.title(), task.description(), text))
    }
}

/// Catalog defaults for synthetic entries built from dynamic records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicTaskDefaults {
    /// Module used when the record does not name one.
    pub module: TaskModule,
    /// Phase used when the record does not name one.
    pub phase: PhaseId,
    /// Importance assigned to every dynamic task.
    pub importance: Importance,
}

impl Default for DynamicTaskDefaults {
    fn default() -> Self {
        Self {
            module: TaskModule::Social,
            phase: PhaseId::first_week(),
            importance: Importance::Recommended,
        }
    }
}

/// A task together with the user's record for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWithStatus {
    /// Catalog task, or a synthetic entry for a dynamic task.
    pub task: Task,
    /// The user's record, when one exists.
    pub record: Option<UserTaskRecord>,
    /// Whether `task` was synthesised from a dynamic record.
    pub is_dynamic: bool,
}

/// Lists the tasks visible under `filter`.
///
/// Catalog tasks come first in catalog order, followed by dynamic tasks in
/// record order. Dynamic tasks are records with no catalog counterpart that
/// carry a title and description; only the module, phase and search
/// restrictions apply to them, since they have no city, importance or
/// persona data of their own.
///
/// A status restriction narrows the records rather than the catalog:
/// catalog tasks whose record is in another status are still listed, with
/// no record attached, while such dynamic tasks disappear.
#[must_use]
pub fn filter_tasks(
    catalog: &Catalog,
    records: &[UserTaskRecord],
    filter: &TaskFilter,
    defaults: &DynamicTaskDefaults,
) -> Vec<TaskWithStatus> {
    let needle = filter.search_needle();
    let wanted: Vec<&UserTaskRecord> = records
        .iter()
        .filter(|record| filter.status.is_none_or(|status| record.status() == status))
        .collect();
    let by_task: HashMap<&TaskId, &UserTaskRecord> = wanted
        .iter()
        .map(|record| (record.task_id(), *record))
        .collect();

    let catalog_tasks = catalog
        .tasks()
        .iter()
        .filter(|task| filter.matches_catalog_task(task, needle.as_deref()))
        .map(|task| TaskWithStatus {
            task: task.clone(),
            record: by_task.get(task.id()).map(|record| (*record).clone()),
            is_dynamic: false,
        });

    let dynamic_tasks = wanted
        .iter()
        .copied()
        .filter(|record| !catalog.contains(record.task_id()))
        .filter(|record| matches_dynamic_record(record, filter, needle.as_deref()))
        .filter_map(|record| synthesise(record, defaults));

    catalog_tasks.chain(dynamic_tasks).collect()
}

fn matches_dynamic_record(
    record: &UserTaskRecord,
    filter: &TaskFilter,
    needle: Option<&str>,
) -> bool {
    let Some(fields) = record.dynamic().filter(|fields| fields.is_complete()) else {
        return false;
    };
    filter
        .module
        .is_none_or(|module| fields.module == Some(module))
        && filter
            .phase
            .as_ref()
            .is_none_or(|phase| fields.phase.as_ref() == Some(phase))
        && needle.is_none_or(|text| mentions(&fields.title, &fields.description, text))
}

fn synthesise(record: &UserTaskRecord, defaults: &DynamicTaskDefaults) -> Option<TaskWithStatus> {
    let fields = record.dynamic()?;
    let task = Task::new(TaskDefinition {
        id: record.task_id().clone(),
        title: fields.title.clone(),
        description: fields.description.clone(),
        module: fields.module.unwrap_or(defaults.module),
        phase: fields
            .phase
            .clone()
            .unwrap_or_else(|| defaults.phase.clone()),
        importance: defaults.importance,
    });
    Some(TaskWithStatus {
        task,
        record: Some(record.clone()),
        is_dynamic: true,
    })
}

fn mentions(title: &str, description: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle) || description.to_lowercase().contains(needle)
}
