//! When steps for task status progression BDD scenarios.

use super::world::{ProgressWorld, run_async};
use eyre::WrapErr;
use landfall::{
    catalog::domain::{SubtaskId, TaskId},
    progress::{
        domain::{SubtaskProgress, TaskMetadata, TaskStatus},
        services::UpdateTaskRequest,
    },
};
use rstest_bdd_macros::when;
use serde_json::json;

fn apply(
    world: &mut ProgressWorld,
    task: &str,
    request: UpdateTaskRequest,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(task)?;
    let record = run_async(world.service()?.update_task(world.user, &task_id, request))
        .wrap_err("update task in progression scenario")?;
    world.record_update(record);
    Ok(())
}

fn provider_metadata(action: String, provider: &str, done: bool) -> TaskMetadata {
    TaskMetadata::new().with_bucket(action, json!({ provider: done }))
}

#[when(r#"the user saves task "{task}" without changes"#)]
fn save_without_changes(world: &mut ProgressWorld, task: String) -> Result<(), eyre::Report> {
    apply(world, &task, UpdateTaskRequest::new())
}

#[when(r#"the user checks subtask "{subtask}" of task "{task}""#)]
fn check_subtask(
    world: &mut ProgressWorld,
    subtask: String,
    task: String,
) -> Result<(), eyre::Report> {
    let progress = SubtaskProgress::new().with(SubtaskId::new(subtask)?, true);
    apply(
        world,
        &task,
        UpdateTaskRequest::new().with_subtask_progress(progress),
    )
}

#[when(r#"the user marks provider "{provider}" of "{action}" done on task "{task}""#)]
fn mark_provider_done(
    world: &mut ProgressWorld,
    provider: String,
    action: String,
    task: String,
) -> Result<(), eyre::Report> {
    let metadata = provider_metadata(action, &provider, true);
    apply(world, &task, UpdateTaskRequest::new().with_metadata(metadata))
}

#[when(r#"the user marks provider "{provider}" of "{action}" not done on task "{task}""#)]
fn mark_provider_not_done(
    world: &mut ProgressWorld,
    provider: String,
    action: String,
    task: String,
) -> Result<(), eyre::Report> {
    let metadata = provider_metadata(action, &provider, false);
    apply(world, &task, UpdateTaskRequest::new().with_metadata(metadata))
}

#[when(r#"the user sets task "{task}" to "{status}""#)]
fn set_status(world: &mut ProgressWorld, task: String, status: String) -> Result<(), eyre::Report> {
    let explicit = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    apply(world, &task, UpdateTaskRequest::new().with_status(explicit))
}
