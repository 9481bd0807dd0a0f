//! Shared world state for task status progression BDD scenarios.

use crate::test_helpers::FixedClock;
use chrono::{DateTime, Utc};
use landfall::progress::{
    adapters::memory::InMemoryUserTaskRepository,
    domain::{UserId, UserTaskRecord},
    services::TaskProgressService,
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestProgressService =
    TaskProgressService<InMemoryUserTaskRepository<FixedClock>, FixedClock>;

/// Scenario world for status progression behaviour tests.
pub struct ProgressWorld {
    pub service: Option<TestProgressService>,
    pub clock: Option<FixedClock>,
    pub user: UserId,
    pub last_record: Option<UserTaskRecord>,
    pub previous_completion: Option<DateTime<Utc>>,
}

impl ProgressWorld {
    /// Creates a world for a fresh user with no catalog loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: None,
            clock: None,
            user: UserId::new(),
            last_record: None,
            previous_completion: None,
        }
    }

    /// Returns the progress service built by the catalog step.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog has been loaded in the scenario.
    pub fn service(&self) -> Result<&TestProgressService, eyre::Report> {
        self.service
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing progress service in scenario world"))
    }

    /// Returns the frozen clock shared by the scenario's services.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog has been loaded in the scenario.
    pub fn clock(&self) -> Result<FixedClock, eyre::Report> {
        self.clock
            .ok_or_else(|| eyre::eyre!("missing clock in scenario world"))
    }

    /// Stores the outcome of an update, remembering the previous stamp.
    pub fn record_update(&mut self, record: UserTaskRecord) {
        self.previous_completion = self
            .last_record
            .as_ref()
            .and_then(UserTaskRecord::completed_at);
        self.last_record = Some(record);
    }
}

impl Default for ProgressWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProgressWorld {
    ProgressWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
