//! Repository port for per-user task records.

use crate::catalog::domain::TaskId;
use crate::progress::domain::{RecordUpdate, TaskStatus, UserId, UserTaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user task repository operations.
pub type UserTaskRepositoryResult<T> = Result<T, UserTaskRepositoryError>;

/// Persistence contract for user task records.
///
/// Implementations need not make read-modify-write sequences atomic;
/// callers that update the same (user, task) pair concurrently must
/// serialize those updates themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserTaskRepository: Send + Sync {
    /// Finds the user's record for a task.
    ///
    /// Returns `None` when the user has no record for the task.
    async fn get(
        &self,
        user_id: UserId,
        task_id: &TaskId,
    ) -> UserTaskRepositoryResult<Option<UserTaskRecord>>;

    /// Returns the user's records, optionally restricted to one status.
    ///
    /// Records are returned in creation order.
    async fn get_all(
        &self,
        user_id: UserId,
        status: Option<TaskStatus>,
    ) -> UserTaskRepositoryResult<Vec<UserTaskRecord>>;

    /// Applies a partial update, creating a `todo` record first when the
    /// user has none for the task.
    ///
    /// Returns the stored record after the update.
    async fn upsert(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        update: RecordUpdate,
    ) -> UserTaskRepositoryResult<UserTaskRecord>;
}

/// Errors returned by user task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserTaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserTaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
