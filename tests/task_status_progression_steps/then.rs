//! Then steps for task status progression BDD scenarios.

use super::world::ProgressWorld;
use landfall::progress::domain::{TaskStatus, UserTaskRecord};
use mockable::Clock;
use rstest_bdd_macros::then;

fn last_record(world: &ProgressWorld) -> Result<&UserTaskRecord, eyre::Report> {
    world
        .last_record
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task record"))
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ProgressWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let record = last_record(world)?;

    if record.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            record.status().as_str()
        ));
    }
    Ok(())
}

#[then("the completion timestamp is unset")]
fn completion_timestamp_unset(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let record = last_record(world)?;
    eyre::ensure!(
        record.completed_at().is_none(),
        "expected no completion timestamp, found {:?}",
        record.completed_at()
    );
    Ok(())
}

#[then("the completion timestamp is set")]
fn completion_timestamp_set(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let record = last_record(world)?;
    let now = world.clock()?.utc();
    eyre::ensure!(
        record.completed_at() == Some(now),
        "expected completion at {now}, found {:?}",
        record.completed_at()
    );
    Ok(())
}

#[then("the completion timestamp is unchanged")]
fn completion_timestamp_unchanged(world: &ProgressWorld) -> Result<(), eyre::Report> {
    let record = last_record(world)?;
    eyre::ensure!(
        world.previous_completion.is_some(),
        "no earlier completion timestamp to compare against"
    );
    eyre::ensure!(
        record.completed_at() == world.previous_completion,
        "completion timestamp moved from {:?} to {:?}",
        world.previous_completion,
        record.completed_at()
    );
    Ok(())
}
