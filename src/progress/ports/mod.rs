//! Port contracts for task progress.
//!
//! Ports define infrastructure-agnostic interfaces used by progress services.

pub mod repository;

pub use repository::{UserTaskRepository, UserTaskRepositoryError, UserTaskRepositoryResult};

#[cfg(test)]
pub use repository::MockUserTaskRepository;
