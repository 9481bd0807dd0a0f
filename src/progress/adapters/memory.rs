//! In-memory user task repository.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::catalog::domain::TaskId;
use crate::progress::{
    domain::{RecordUpdate, TaskStatus, UserId, UserTaskRecord},
    ports::{UserTaskRepository, UserTaskRepositoryError, UserTaskRepositoryResult},
};

/// Thread-safe in-memory user task repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserTaskRepository<C: Clock + Send + Sync> {
    state: Arc<RwLock<InMemoryRecordState>>,
    clock: C,
}

#[derive(Debug, Default)]
struct InMemoryRecordState {
    records: HashMap<UserId, Vec<UserTaskRecord>>,
}

impl<C: Clock + Send + Sync> InMemoryUserTaskRepository<C> {
    /// Creates an empty repository stamping records with `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRecordState::default())),
            clock,
        }
    }
}

fn lock_error(message: String) -> UserTaskRepositoryError {
    UserTaskRepositoryError::persistence(std::io::Error::other(message))
}

#[async_trait]
impl<C: Clock + Send + Sync> UserTaskRepository for InMemoryUserTaskRepository<C> {
    async fn get(
        &self,
        user_id: UserId,
        task_id: &TaskId,
    ) -> UserTaskRepositoryResult<Option<UserTaskRecord>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(err.to_string()))?;
        let record = state
            .records
            .get(&user_id)
            .and_then(|records| records.iter().find(|record| record.task_id() == task_id))
            .cloned();
        Ok(record)
    }

    async fn get_all(
        &self,
        user_id: UserId,
        status: Option<TaskStatus>,
    ) -> UserTaskRepositoryResult<Vec<UserTaskRecord>> {
        let state = self
            .state
            .read()
            .map_err(|err| lock_error(err.to_string()))?;
        let records = state
            .records
            .get(&user_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| status.is_none_or(|wanted| record.status() == wanted))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn upsert(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        update: RecordUpdate,
    ) -> UserTaskRepositoryResult<UserTaskRecord> {
        let now = self.clock.utc();
        let mut state = self
            .state
            .write()
            .map_err(|err| lock_error(err.to_string()))?;
        let records = state.records.entry(user_id).or_default();

        if !records.iter().any(|record| record.task_id() == task_id) {
            records.push(UserTaskRecord::new(user_id, task_id.clone(), now));
        }
        let record = records
            .iter_mut()
            .find(|record| record.task_id() == task_id)
            .ok_or_else(|| lock_error(format!("record for task {task_id} was not stored")))?;
        record.apply(update, now);
        Ok(record.clone())
    }
}
