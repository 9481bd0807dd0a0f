//! Catalog task entries.

use super::{ActionBlock, CityId, PersonaId, PhaseId, Subtask, TaskId};
use serde::{Deserialize, Serialize};

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskModule {
    /// Finding somewhere to live.
    Housing,
    /// Employment and job search.
    #[serde(alias = "job")]
    Work,
    /// Registrations, permits, insurance.
    Bureaucracy,
    /// Community and social life.
    Social,
}

impl TaskModule {
    /// Returns the canonical module identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Work => "work",
            Self::Bureaucracy => "bureaucracy",
            Self::Social => "social",
        }
    }
}

/// How urgent a task is for a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Must be done; blocks other parts of the journey.
    Critical,
    /// Strongly advised.
    High,
    /// Useful but deferrable.
    Medium,
    /// Nice to have. Default tier for user-created tasks.
    Recommended,
}

impl Importance {
    /// Returns the canonical importance identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Recommended => "recommended",
        }
    }
}

/// An immutable catalog task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city_note: Option<String>,
    module: TaskModule,
    phase: PhaseId,
    importance: Importance,
    #[serde(default)]
    city_scope: Vec<CityId>,
    #[serde(default)]
    dependencies: Vec<TaskId>,
    #[serde(default)]
    personas: Vec<PersonaId>,
    #[serde(default)]
    subtasks: Vec<Subtask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action_block: Option<ActionBlock>,
}

/// Parameter object for building a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    /// Stable task identifier.
    pub id: TaskId,
    /// Display title in the catalog's base locale.
    pub title: String,
    /// Description in the catalog's base locale.
    pub description: String,
    /// Life area of the task.
    pub module: TaskModule,
    /// Journey phase the task is scheduled in.
    pub phase: PhaseId,
    /// Importance tier.
    pub importance: Importance,
}

impl Task {
    /// Creates a universal task with no dependencies or subtasks.
    #[must_use]
    pub fn new(definition: TaskDefinition) -> Self {
        let TaskDefinition {
            id,
            title,
            description,
            module,
            phase,
            importance,
        } = definition;
        Self {
            id,
            title,
            description,
            city_note: None,
            module,
            phase,
            importance,
            city_scope: Vec::new(),
            dependencies: Vec::new(),
            personas: Vec::new(),
            subtasks: Vec::new(),
            action_block: None,
        }
    }

    /// Sets the city-specific note.
    #[must_use]
    pub fn with_city_note(mut self, note: impl Into<String>) -> Self {
        self.city_note = Some(note.into());
        self
    }

    /// Restricts the task to the given cities.
    #[must_use]
    pub fn with_city_scope(mut self, cities: impl IntoIterator<Item = CityId>) -> Self {
        self.city_scope = cities.into_iter().collect();
        self
    }

    /// Sets the tasks that must be done before this one.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = TaskId>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Restricts the task to the given personas.
    #[must_use]
    pub fn with_personas(mut self, personas: impl IntoIterator<Item = PersonaId>) -> Self {
        self.personas = personas.into_iter().collect();
        self
    }

    /// Sets the subtask definitions.
    #[must_use]
    pub fn with_subtasks(mut self, subtasks: impl IntoIterator<Item = Subtask>) -> Self {
        self.subtasks = subtasks.into_iter().collect();
        self
    }

    /// Attaches links, templates, and a document checklist.
    #[must_use]
    pub fn with_action_block(mut self, block: ActionBlock) -> Self {
        self.attach_action_block(block);
        self
    }

    pub(crate) fn attach_action_block(&mut self, block: ActionBlock) {
        self.action_block = Some(block);
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the city-specific note, if any.
    #[must_use]
    pub fn city_note(&self) -> Option<&str> {
        self.city_note.as_deref()
    }

    /// Returns the life area.
    #[must_use]
    pub const fn module(&self) -> TaskModule {
        self.module
    }

    /// Returns the journey phase identifier.
    #[must_use]
    pub const fn phase(&self) -> &PhaseId {
        &self.phase
    }

    /// Returns the importance tier.
    #[must_use]
    pub const fn importance(&self) -> Importance {
        self.importance
    }

    /// Returns the city scope. Empty means every city.
    #[must_use]
    pub fn city_scope(&self) -> &[CityId] {
        &self.city_scope
    }

    /// Returns the dependency identifiers in declared order.
    #[must_use]
    pub fn dependencies(&self) -> &[TaskId] {
        &self.dependencies
    }

    /// Returns the persona restriction. Empty means every persona.
    #[must_use]
    pub fn personas(&self) -> &[PersonaId] {
        &self.personas
    }

    /// Returns the subtask definitions in declared order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the action block, if one was authored for the task.
    #[must_use]
    pub const fn action_block(&self) -> Option<&ActionBlock> {
        self.action_block.as_ref()
    }

    /// Returns the subtasks that gate automatic completion.
    pub fn required_subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks.iter().filter(|subtask| subtask.is_required())
    }

    /// Returns whether the task applies to the given city.
    #[must_use]
    pub fn applies_to_city(&self, city: &CityId) -> bool {
        self.city_scope.is_empty() || self.city_scope.contains(city)
    }

    /// Returns whether the task applies to the given persona.
    #[must_use]
    pub fn applies_to_persona(&self, persona: &PersonaId) -> bool {
        self.personas.is_empty() || self.personas.contains(persona)
    }

    /// Replaces translatable text, keeping every structural field.
    pub(crate) fn into_translated(self, text: TranslatedText) -> Self {
        let TranslatedText {
            title,
            description,
            city_note,
            subtasks,
        } = text;
        Self {
            title,
            description,
            city_note,
            subtasks,
            ..self
        }
    }
}

/// Translatable text of a task after overlay resolution.
pub(crate) struct TranslatedText {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) city_note: Option<String>,
    pub(crate) subtasks: Vec<Subtask>,
}
