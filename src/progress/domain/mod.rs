//! Domain model for per-user task progress.
//!
//! Records track a user's status, notes and subtask signals per task. The
//! pure functions in this module resolve dependencies, filter the visible
//! task list, and derive a task's status from its signals; none of them
//! perform I/O.

mod dependency;
mod engine;
mod error;
mod filter;
mod ids;
mod record;
mod signals;
mod status;

pub use dependency::{DependencyCheck, check_dependencies};
pub use engine::{
    LinkedTaskCompletion, StatusSignals, completion_timestamp, derive_status,
    is_subtask_satisfied,
};
pub use error::ParseTaskStatusError;
pub use filter::{DynamicTaskDefaults, TaskFilter, TaskWithStatus, filter_tasks};
pub use ids::UserId;
pub use record::{DynamicTaskFields, RecordUpdate, UserTaskRecord};
pub use signals::{SubtaskProgress, TaskMetadata};
pub use status::TaskStatus;
