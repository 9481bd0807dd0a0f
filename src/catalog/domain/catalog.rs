//! Validated task catalog and its raw document form.

use super::{
    ActionBlock, CatalogError, City, CityId, Importance, JourneyPhase, ModuleInfo, Task, TaskId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Unvalidated catalog contents as authored in configuration data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Journey phases, in any order.
    #[serde(default)]
    pub journey_phases: Vec<JourneyPhase>,
    /// Catalog tasks in presentation order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Destination cities.
    #[serde(default)]
    pub cities: Vec<City>,
    /// Display entries for task modules.
    #[serde(default)]
    pub modules: Vec<ModuleInfo>,
    /// Action blocks keyed by the task they belong to.
    #[serde(default)]
    pub action_blocks: BTreeMap<TaskId, ActionBlock>,
}

/// Immutable, validated set of predefined tasks.
///
/// Construction guarantees unique task ids, no dangling dependency or
/// linked-task references, and an acyclic dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
}

impl Catalog {
    /// Validates and indexes catalog tasks.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTask`],
    /// [`CatalogError::DanglingDependency`],
    /// [`CatalogError::DanglingLinkedTask`] or
    /// [`CatalogError::DependencyCycle`] when the tasks violate a catalog
    /// invariant.
    pub fn new(entries: impl IntoIterator<Item = Task>) -> Result<Self, CatalogError> {
        let tasks: Vec<Task> = entries.into_iter().collect();
        let mut index = HashMap::with_capacity(tasks.len());
        for (position, task) in tasks.iter().enumerate() {
            if index.insert(task.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateTask(task.id().clone()));
            }
        }

        let catalog = Self { tasks, index };
        catalog.check_references()?;
        catalog.check_acyclic()?;
        Ok(catalog)
    }

    /// Attaches action blocks to their tasks.
    ///
    /// A block replaces any block the task already carries.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownActionBlockTask`] when a block is keyed
    /// by a task the catalog does not define.
    pub fn with_action_blocks(
        mut self,
        blocks: impl IntoIterator<Item = (TaskId, ActionBlock)>,
    ) -> Result<Self, CatalogError> {
        for (id, block) in blocks {
            let task = self
                .index
                .get(&id)
                .and_then(|position| self.tasks.get_mut(*position))
                .ok_or(CatalogError::UnknownActionBlockTask(id))?;
            task.attach_action_block(block);
        }
        Ok(self)
    }

    /// Returns all tasks in catalog order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the catalog has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.index
            .get(id)
            .and_then(|position| self.tasks.get(*position))
    }

    /// Returns whether the catalog defines the task.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the dependency tasks of `id` in declared order.
    ///
    /// Returns an empty list when the task is unknown.
    #[must_use]
    pub fn dependencies_of(&self, id: &TaskId) -> Vec<&Task> {
        self.get(id)
            .map(|task| {
                task.dependencies()
                    .iter()
                    .filter_map(|dependency| self.get(dependency))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the tasks that list `id` as a dependency.
    #[must_use]
    pub fn dependents_of(&self, id: &TaskId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.dependencies().contains(id))
            .collect()
    }

    /// Returns the critical tasks that apply to the given city.
    #[must_use]
    pub fn critical_tasks_for_city(&self, city: &CityId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.importance() == Importance::Critical && task.applies_to_city(city))
            .collect()
    }

    /// Builds a catalog with the same structure and transformed tasks.
    ///
    /// The transform must preserve task identifiers; the index is reused.
    pub(crate) fn map_tasks(&self, transform: impl FnMut(&Task) -> Task) -> Self {
        Self {
            tasks: self.tasks.iter().map(transform).collect(),
            index: self.index.clone(),
        }
    }

    fn check_references(&self) -> Result<(), CatalogError> {
        for task in &self.tasks {
            if let Some(dependency) = task
                .dependencies()
                .iter()
                .find(|dependency| !self.contains(dependency))
            {
                return Err(CatalogError::DanglingDependency {
                    task: task.id().clone(),
                    dependency: dependency.clone(),
                });
            }

            for subtask in task.subtasks() {
                if let Some(linked) = subtask.linked_task_id()
                    && !self.contains(linked)
                {
                    return Err(CatalogError::DanglingLinkedTask {
                        task: task.id().clone(),
                        subtask: subtask.id().clone(),
                        linked: linked.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<(), CatalogError> {
        let mut marks = vec![Mark::Unvisited; self.tasks.len()];
        for start in 0..self.tasks.len() {
            let mut path = Vec::new();
            self.visit(start, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        position: usize,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Result<(), CatalogError> {
        match marks.get(position).copied() {
            Some(Mark::Done) | None => return Ok(()),
            Some(Mark::InProgress) => return Err(self.cycle_error(position, path)),
            Some(Mark::Unvisited) => {}
        }
        if let Some(mark) = marks.get_mut(position) {
            *mark = Mark::InProgress;
        }
        path.push(position);

        let dependencies = self
            .tasks
            .get(position)
            .map(Task::dependencies)
            .unwrap_or_default();
        for dependency in dependencies {
            if let Some(next) = self.index.get(dependency) {
                self.visit(*next, marks, path)?;
            }
        }

        path.pop();
        if let Some(mark) = marks.get_mut(position) {
            *mark = Mark::Done;
        }
        Ok(())
    }

    fn cycle_error(&self, repeated: usize, path: &[usize]) -> CatalogError {
        let cycle_start = path
            .iter()
            .position(|position| *position == repeated)
            .unwrap_or_default();
        let cycle = path
            .iter()
            .skip(cycle_start)
            .chain(std::iter::once(&repeated))
            .filter_map(|position| self.tasks.get(*position))
            .map(|task| task.id().clone())
            .collect();
        CatalogError::DependencyCycle(cycle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}
