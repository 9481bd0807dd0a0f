//! Service layer for task status updates, record lifecycle, and listings.

use crate::catalog::{
    domain::{CatalogError, CityId, Locale, PhaseId, Task, TaskId, TaskModule},
    services::CatalogService,
};
use crate::progress::{
    domain::{
        DependencyCheck, DynamicTaskFields, LinkedTaskCompletion, RecordUpdate, StatusSignals,
        SubtaskProgress, TaskFilter, TaskMetadata, TaskStatus, TaskWithStatus, UserId,
        UserTaskRecord, check_dependencies, completion_timestamp, derive_status, filter_tasks,
    },
    ports::{UserTaskRepository, UserTaskRepositoryError},
    services::ProgressConfig,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Request payload for updating a user's task record.
///
/// Absent fields leave the stored record untouched. Without an explicit
/// status the service derives one from the resulting signals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskRequest {
    status: Option<TaskStatus>,
    notes: Option<String>,
    custom_due_date: Option<Option<NaiveDate>>,
    subtask_progress: Option<SubtaskProgress>,
    metadata: Option<TaskMetadata>,
    has_documents: bool,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status explicitly, bypassing automatic derivation.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the due date, or clears it with `None`.
    #[must_use]
    pub const fn with_custom_due_date(mut self, due: Option<NaiveDate>) -> Self {
        self.custom_due_date = Some(due);
        self
    }

    /// Replaces the simple-subtask checkbox map.
    #[must_use]
    pub fn with_subtask_progress(mut self, progress: SubtaskProgress) -> Self {
        self.subtask_progress = Some(progress);
        self
    }

    /// Replaces the metadata buckets.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Records whether documents are attached to the task.
    #[must_use]
    pub const fn with_documents(mut self, has_documents: bool) -> Self {
        self.has_documents = has_documents;
        self
    }
}

/// Request payload for creating a user-defined task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDynamicTaskRequest {
    title: String,
    description: String,
    module: Option<TaskModule>,
    phase: Option<PhaseId>,
}

impl CreateDynamicTaskRequest {
    /// Creates a request with the required text fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            module: None,
            phase: None,
        }
    }

    /// Sets the life area.
    #[must_use]
    pub const fn with_module(mut self, module: TaskModule) -> Self {
        self.module = Some(module);
        self
    }

    /// Sets the journey phase.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Service-level errors for task progress operations.
#[derive(Debug, Error)]
pub enum TaskProgressError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserTaskRepositoryError),
    /// A generated identifier was rejected.
    #[error(transparent)]
    Identifier(#[from] CatalogError),
    /// A dynamic task was submitted without a title or description.
    #[error("dynamic task requires a non-blank title and description")]
    IncompleteDynamicTask,
}

/// Result type for task progress service operations.
pub type TaskProgressResult<T> = Result<T, TaskProgressError>;

/// Task progress orchestration service.
///
/// Updates are read-compute-write sequences against the repository and are
/// not atomic. Callers must serialize concurrent updates to the same
/// (user, task) pair; racing updates lose writes.
#[derive(Clone)]
pub struct TaskProgressService<R, C>
where
    R: UserTaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    catalog: Arc<CatalogService<C>>,
    clock: Arc<C>,
    config: ProgressConfig,
}

impl<R, C> TaskProgressService<R, C>
where
    R: UserTaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a progress service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, catalog: Arc<CatalogService<C>>, clock: Arc<C>) -> Self {
        Self {
            repository,
            catalog,
            clock,
            config: ProgressConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub fn with_config(mut self, config: ProgressConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Returns the user's record for a task, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when the lookup fails.
    pub async fn record(
        &self,
        user_id: UserId,
        task_id: &TaskId,
    ) -> TaskProgressResult<Option<UserTaskRecord>> {
        Ok(self.repository.get(user_id, task_id).await?)
    }

    /// Applies a partial update to the user's task record.
    ///
    /// When the request carries no status, the new status is derived from
    /// the record's signals after the update. The completion timestamp
    /// follows the resulting status either way.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when reading or writing
    /// records fails.
    pub async fn update_task(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        request: UpdateTaskRequest,
    ) -> TaskProgressResult<UserTaskRecord> {
        let UpdateTaskRequest {
            status,
            notes,
            custom_due_date,
            subtask_progress,
            metadata,
            has_documents,
        } = request;

        let existing = self.repository.get(user_id, task_id).await?;
        let base = self.catalog.base_catalog();
        let task = base.get(task_id);
        let linked_tasks = self.linked_task_completion(user_id, task).await?;

        let current_status = existing
            .as_ref()
            .map_or(TaskStatus::Todo, UserTaskRecord::status);
        let previous_completion = existing.as_ref().and_then(UserTaskRecord::completed_at);
        let effective_progress = subtask_progress
            .clone()
            .or_else(|| existing.as_ref().map(|record| record.subtask_progress().clone()))
            .unwrap_or_default();
        let effective_metadata = metadata
            .clone()
            .or_else(|| existing.as_ref().map(|record| record.metadata().clone()))
            .unwrap_or_default();
        let has_notes = notes
            .as_deref()
            .or_else(|| existing.as_ref().and_then(UserTaskRecord::notes))
            .is_some_and(|text| !text.trim().is_empty());

        let signals = StatusSignals {
            subtask_progress: &effective_progress,
            linked_tasks: &linked_tasks,
            has_notes,
            has_documents,
            metadata: &effective_metadata,
        };
        let next_status = status.unwrap_or_else(|| derive_status(current_status, task, &signals));
        let completed_at = completion_timestamp(next_status, previous_completion, self.clock.utc());

        if next_status != current_status {
            info!(
                user_id = %user_id,
                task_id = %task_id,
                from = %current_status,
                to = %next_status,
                explicit = status.is_some(),
                "task status changed"
            );
        }

        let update = RecordUpdate {
            status: Some(next_status),
            notes,
            custom_due_date,
            completed_at: Some(completed_at),
            subtask_progress,
            metadata,
            dynamic: None,
        };
        Ok(self.repository.upsert(user_id, task_id, update).await?)
    }

    /// Merges metadata buckets into the stored record and re-derives its
    /// status.
    ///
    /// Buckets in `updates` replace stored buckets of the same key.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when reading or writing
    /// records fails.
    pub async fn update_task_metadata(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        updates: &TaskMetadata,
    ) -> TaskProgressResult<UserTaskRecord> {
        let existing = self.repository.get(user_id, task_id).await?;
        let merged = existing.as_ref().map_or_else(
            || updates.clone(),
            |record| record.metadata().merged(updates),
        );
        self.update_task(
            user_id,
            task_id,
            UpdateTaskRequest::new().with_metadata(merged),
        )
        .await
    }

    /// Returns the user's record for a task, creating a `todo` record when
    /// none exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when reading or writing
    /// records fails.
    pub async fn create_user_task(
        &self,
        user_id: UserId,
        task_id: &TaskId,
    ) -> TaskProgressResult<UserTaskRecord> {
        if let Some(record) = self.repository.get(user_id, task_id).await? {
            return Ok(record);
        }
        debug!(user_id = %user_id, task_id = %task_id, "creating task record");
        Ok(self
            .repository
            .upsert(user_id, task_id, RecordUpdate::new())
            .await?)
    }

    /// Creates a user-defined task outside the catalog.
    ///
    /// The task receives a generated identifier and starts as `todo`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::IncompleteDynamicTask`] when the title
    /// or description is blank, and [`TaskProgressError::Repository`] when
    /// the record cannot be stored.
    pub async fn create_dynamic_task(
        &self,
        user_id: UserId,
        request: CreateDynamicTaskRequest,
    ) -> TaskProgressResult<UserTaskRecord> {
        let CreateDynamicTaskRequest {
            title,
            description,
            module,
            phase,
        } = request;
        let fields = DynamicTaskFields {
            title,
            description,
            module,
            phase,
            is_system_generated: true,
        };
        if !fields.is_complete() {
            return Err(TaskProgressError::IncompleteDynamicTask);
        }

        let task_id = TaskId::new(format!(
            "{}{}",
            self.config.dynamic_task_id_prefix,
            Uuid::new_v4()
        ))?;
        info!(user_id = %user_id, task_id = %task_id, "dynamic task created");

        let update = RecordUpdate::new()
            .with_status(TaskStatus::Todo)
            .with_dynamic(fields);
        Ok(self.repository.upsert(user_id, &task_id, update).await?)
    }

    /// Ensures the user has a record for every critical task in scope for
    /// `city`.
    ///
    /// Returns the records in catalog order, including ones that already
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when reading or writing
    /// records fails.
    pub async fn initialize_user_tasks(
        &self,
        user_id: UserId,
        city: &CityId,
    ) -> TaskProgressResult<Vec<UserTaskRecord>> {
        let base = self.catalog.base_catalog();
        let mut records = Vec::new();
        let mut created = 0_usize;

        for task in base.critical_tasks_for_city(city) {
            if let Some(record) = self.repository.get(user_id, task.id()).await? {
                records.push(record);
                continue;
            }
            records.push(
                self.repository
                    .upsert(user_id, task.id(), RecordUpdate::new())
                    .await?,
            );
            created += 1;
        }

        info!(
            user_id = %user_id,
            city = %city,
            created,
            total = records.len(),
            "initialised user tasks"
        );
        Ok(records)
    }

    /// Lists the tasks visible to the user under `filter`, each paired with
    /// the user's record.
    ///
    /// A status restriction is pushed down to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when the records cannot be
    /// loaded.
    pub async fn tasks_with_status(
        &self,
        user_id: UserId,
        filter: &TaskFilter,
    ) -> TaskProgressResult<Vec<TaskWithStatus>> {
        let locale = filter
            .locale
            .unwrap_or(self.catalog.config().base_locale);
        let catalog = self.catalog.catalog(locale);
        let records = self.repository.get_all(user_id, filter.status).await?;
        Ok(filter_tasks(
            &catalog,
            &records,
            filter,
            &self.config.dynamic_task_defaults,
        ))
    }

    /// Reports which dependencies of a task the user has not finished.
    ///
    /// Returns `None` when the catalog does not define the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskProgressError::Repository`] when the records cannot be
    /// loaded.
    pub async fn check_dependencies(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        locale: Locale,
    ) -> TaskProgressResult<Option<DependencyCheck>> {
        let catalog = self.catalog.catalog(locale);
        let Some(task) = catalog.get(task_id) else {
            return Ok(None);
        };
        let records = self.repository.get_all(user_id, None).await?;
        Ok(Some(check_dependencies(task, &catalog, &records)))
    }

    async fn linked_task_completion(
        &self,
        user_id: UserId,
        task: Option<&Task>,
    ) -> TaskProgressResult<LinkedTaskCompletion> {
        let mut completion = LinkedTaskCompletion::new();
        for subtask in task.into_iter().flat_map(|definition| definition.subtasks()) {
            let Some(linked) = subtask.linked_task_id() else {
                continue;
            };
            let done = self
                .repository
                .get(user_id, linked)
                .await?
                .is_some_and(|record| record.status().is_done());
            completion.insert(subtask.id().clone(), done);
        }
        Ok(completion)
    }
}
