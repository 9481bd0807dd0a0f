//! Shared catalog fixtures and clocks for integration tests.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use eyre::{OptionExt, Result};
use landfall::catalog::domain::{
    CatalogDocument, Importance, JourneyPhase, PhaseId, Subtask, SubtaskId, SubtaskKind, Task,
    TaskDefinition, TaskId, TaskModule,
};
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock frozen at noon UTC on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if noon cannot be represented on `date`.
    pub fn at_noon(date: NaiveDate) -> Result<Self> {
        let noon = date.and_hms_opt(12, 0, 0).ok_or_eyre("invalid time of day")?;
        Ok(Self(Utc.from_utc_datetime(&noon)))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a calendar date.
///
/// # Errors
///
/// Returns an error for impossible dates.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_eyre("invalid calendar date")
}

/// Standard journey phases, authored out of order.
///
/// # Errors
///
/// Returns an error if a phase identifier is rejected.
pub fn journey_phases() -> Result<Vec<JourneyPhase>> {
    Ok(vec![
        JourneyPhase::new(PhaseId::new("week_1")?, 1, 0, Some(7)),
        JourneyPhase::new(PhaseId::new("pre_arrival")?, 0, -90, Some(-1)),
        JourneyPhase::new(PhaseId::new("month_1")?, 2, 8, Some(30)),
        JourneyPhase::new(PhaseId::new("later")?, 3, 31, None),
    ])
}

/// Builds a task with generated text.
///
/// # Errors
///
/// Returns an error if an identifier is rejected.
pub fn task(id: &str, module: TaskModule, phase: &str, importance: Importance) -> Result<Task> {
    Ok(Task::new(TaskDefinition {
        id: TaskId::new(id)?,
        title: format!("{id} title"),
        description: format!("{id} description"),
        module,
        phase: PhaseId::new(phase)?,
        importance,
    }))
}

/// Catalog with a single task `task_id` gated by a required checkbox `s1`
/// and a required external action `a1` of type `action_type` offered by
/// providers `p1` and `p2`.
///
/// # Errors
///
/// Returns an error if an identifier is rejected.
pub fn checkbox_and_action_document(task_id: &str, action_type: &str) -> Result<CatalogDocument> {
    let gated = task(task_id, TaskModule::Housing, "week_1", Importance::Critical)?
        .with_subtasks([
            Subtask::new(SubtaskId::new("s1")?, "Checkbox", SubtaskKind::Simple).required(),
            Subtask::new(
                SubtaskId::new("a1")?,
                "Sign up",
                SubtaskKind::ExternalAction {
                    action_type: action_type.to_owned(),
                    providers: vec!["p1".to_owned(), "p2".to_owned()],
                },
            )
            .required(),
        ]);
    Ok(CatalogDocument {
        journey_phases: journey_phases()?,
        tasks: vec![gated],
        ..CatalogDocument::default()
    })
}
