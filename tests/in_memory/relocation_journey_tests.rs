//! In-memory integration tests for a user's journey through dependent tasks.

use super::helpers::{TestService, clock, service};
use crate::test_helpers::FixedClock;
use eyre::{OptionExt, Result, ensure};
use landfall::{
    catalog::domain::{CityId, Locale, PhaseId, SubtaskId, TaskId, TaskModule},
    progress::{
        domain::{SubtaskProgress, TaskFilter, TaskMetadata, TaskStatus, UserId},
        services::{CreateDynamicTaskRequest, UpdateTaskRequest},
    },
};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn journey(clock: Result<FixedClock>) -> Result<(TestService, FixedClock)> {
    let frozen = clock?;
    Ok((service(frozen)?, frozen))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_housing_unblocks_and_completes_registration(
    journey: Result<(TestService, FixedClock)>,
) -> Result<()> {
    let (service, clock) = journey?;
    let user = UserId::new();
    let housing = TaskId::new("find-housing")?;
    let anmeldung = TaskId::new("anmeldung")?;

    let initialised = service
        .initialize_user_tasks(user, &CityId::new("berlin")?)
        .await?;
    ensure!(initialised.len() == 2, "two critical Berlin tasks");

    let blocked = service
        .check_dependencies(user, &anmeldung, Locale::En)
        .await?
        .ok_or_eyre("anmeldung is in the catalog")?;
    ensure!(!blocked.can_complete, "housing blocks registration");

    let booked = service
        .update_task(
            user,
            &anmeldung,
            UpdateTaskRequest::new().with_subtask_progress(
                SubtaskProgress::new().with(SubtaskId::new("book_appointment")?, true),
            ),
        )
        .await?;
    ensure!(booked.status() == TaskStatus::InProgress, "got {}", booked.status());

    let shortlisted = service
        .update_task(
            user,
            &housing,
            UpdateTaskRequest::new().with_notes("Two flats shortlisted in Wedding"),
        )
        .await?;
    ensure!(
        shortlisted.status() == TaskStatus::InProgress,
        "got {}",
        shortlisted.status()
    );

    let housed = service
        .update_task_metadata(
            user,
            &housing,
            &TaskMetadata::new().with_bucket("platform_signup", json!({"wg_gesucht": true})),
        )
        .await?;
    ensure!(housed.status() == TaskStatus::Done, "got {}", housed.status());
    ensure!(housed.completed_at() == Some(clock.utc()), "housing stamped");

    let registered = service
        .update_task(user, &anmeldung, UpdateTaskRequest::new())
        .await?;
    ensure!(
        registered.status() == TaskStatus::Done,
        "linked housing task completes registration, got {}",
        registered.status()
    );

    let unblocked = service
        .check_dependencies(user, &TaskId::new("open-bank-account")?, Locale::En)
        .await?
        .ok_or_eyre("bank task is in the catalog")?;
    ensure!(unblocked.can_complete, "registration is done");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_render_the_requested_locale(
    journey: Result<(TestService, FixedClock)>,
) -> Result<()> {
    let (service, _) = journey?;
    let user = UserId::new();
    service
        .update_task(
            user,
            &TaskId::new("anmeldung")?,
            UpdateTaskRequest::new().with_notes("Bring the rental contract"),
        )
        .await?;
    service
        .create_dynamic_task(
            user,
            CreateDynamicTaskRequest::new("Buy a bike", "Get around Berlin")
                .with_module(TaskModule::Social),
        )
        .await?;

    let english = service
        .tasks_with_status(
            user,
            &TaskFilter::new()
                .with_locale(Locale::En)
                .with_phase(PhaseId::new("week_1")?),
        )
        .await?;
    let entry = english.first().ok_or_eyre("anmeldung is listed")?;
    ensure!(english.len() == 1, "only anmeldung is in week_1");
    ensure!(entry.task.title() == "Register your address", "english title");
    let record = entry.record.as_ref().ok_or_eyre("record attached")?;
    ensure!(record.status() == TaskStatus::InProgress, "notes started the task");

    let munich = service
        .tasks_with_status(user, &TaskFilter::new().with_city(CityId::new("munich")?))
        .await?;
    let titles: Vec<&str> = munich.iter().map(|entry| entry.task.title()).collect();
    ensure!(
        titles == ["find-housing title", "open-bank-account title", "Buy a bike"],
        "got {titles:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_tasks_are_reported_as_missing(
    journey: Result<(TestService, FixedClock)>,
) -> Result<()> {
    let (service, _) = journey?;
    let user = UserId::new();
    let unknown = TaskId::new("learn-german")?;

    ensure!(
        service
            .check_dependencies(user, &unknown, Locale::Tr)
            .await?
            .is_none(),
        "unknown tasks have no dependency report"
    );
    ensure!(
        service.record(user, &unknown).await?.is_none(),
        "no record before any update"
    );
    Ok(())
}
