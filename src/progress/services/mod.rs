//! Application services for task progress.

mod config;
mod progress;

pub use config::ProgressConfig;
pub use progress::{
    CreateDynamicTaskRequest, TaskProgressError, TaskProgressResult, TaskProgressService,
    UpdateTaskRequest,
};
