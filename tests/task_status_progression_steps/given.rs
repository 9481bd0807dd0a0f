//! Given steps for task status progression BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use super::world::ProgressWorld;
use crate::test_helpers::{FixedClock, checkbox_and_action_document, date};
use eyre::WrapErr;
use landfall::{
    catalog::services::{CatalogConfig, CatalogService},
    progress::{adapters::memory::InMemoryUserTaskRepository, services::TaskProgressService},
};
use rstest_bdd_macros::given;

#[given(r#"a catalog task "{task}" gated by checkbox "{subtask}" and action "{action}""#)]
fn catalog_task_gated_by_checkbox_and_action(
    world: &mut ProgressWorld,
    task: String,
    subtask: String,
    action: String,
) -> Result<(), eyre::Report> {
    eyre::ensure!(subtask == "s1", "the fixture catalog gates on checkbox s1");
    let document = checkbox_and_action_document(&task, &action)?;
    let frozen = FixedClock::at_noon(date(2026, 3, 1)?)?;
    let clock = Arc::new(frozen);
    let catalog = CatalogService::from_parts(
        document,
        HashMap::new(),
        CatalogConfig::default(),
        Arc::clone(&clock),
    )
    .wrap_err("build catalog for progression scenario")?;

    world.service = Some(TaskProgressService::new(
        Arc::new(InMemoryUserTaskRepository::new(frozen)),
        Arc::new(catalog),
        clock,
    ));
    world.clock = Some(frozen);
    Ok(())
}
