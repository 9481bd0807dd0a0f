//! Error types for catalog construction and parsing.

use super::{CityId, PhaseId, SubtaskId, TaskId, TaskModule};
use thiserror::Error;

/// Configuration errors detected while building a catalog.
///
/// These are load-time failures: a catalog that produces one of them must
/// not be served.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An identifier was empty after trimming.
    #[error("invalid {kind} identifier '{value}'")]
    InvalidIdentifier {
        /// Kind of identifier being constructed.
        kind: &'static str,
        /// Raw rejected value.
        value: String,
    },

    /// Two catalog entries share the same task identifier.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A task lists a dependency that is not in the catalog.
    #[error("task {task} depends on unknown task {dependency}")]
    DanglingDependency {
        /// Task declaring the dependency.
        task: TaskId,
        /// Missing dependency identifier.
        dependency: TaskId,
    },

    /// A linked-task subtask points at a task that is not in the catalog.
    #[error("subtask {subtask} of task {task} links to unknown task {linked}")]
    DanglingLinkedTask {
        /// Task owning the subtask.
        task: TaskId,
        /// Linked-task subtask identifier.
        subtask: SubtaskId,
        /// Missing linked task identifier.
        linked: TaskId,
    },

    /// The dependency graph contains a cycle.
    #[error("dependency cycle: {}", format_cycle(.0))]
    DependencyCycle(Vec<TaskId>),

    /// The catalog declares no journey phases.
    #[error("catalog must declare at least one journey phase")]
    NoJourneyPhases,

    /// Two journey phases share an identifier.
    #[error("duplicate journey phase identifier: {0}")]
    DuplicatePhase(PhaseId),

    /// An action block is keyed by a task that is not in the catalog.
    #[error("action block for unknown task {0}")]
    UnknownActionBlockTask(TaskId),

    /// The city registry lists a city twice.
    #[error("duplicate city identifier: {0}")]
    DuplicateCity(CityId),

    /// The module registry lists a module twice.
    #[error("duplicate module entry: {}", .0.as_str())]
    DuplicateModule(TaskModule),
}

fn format_cycle(path: &[TaskId]) -> String {
    path.iter()
        .map(TaskId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Error returned while parsing a locale code strictly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct ParseLocaleError(pub String);
