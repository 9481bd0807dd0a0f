//! Integration tests for loading catalogs from a JSON directory.

use std::fs;
use std::sync::Arc;

use super::helpers::{clock, english_overlay, relocation_document};
use crate::test_helpers::{FixedClock, date};
use eyre::{OptionExt, Result};
use landfall::catalog::{
    adapters::json::JsonCatalogSource,
    domain::{Locale, TaskId},
    services::{CatalogConfig, CatalogService, CatalogServiceError},
};
use rstest::rstest;
use tempfile::TempDir;

fn write_catalog_dir() -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("tasks.json"),
        serde_json::to_string_pretty(&relocation_document()?)?,
    )?;
    fs::create_dir(dir.path().join("overlays"))?;
    fs::write(
        dir.path().join("overlays").join("en.json"),
        serde_json::to_string(&english_overlay()?)?,
    )?;
    Ok(dir)
}

async fn load(dir: &TempDir, clock: FixedClock) -> Result<CatalogService<FixedClock>> {
    let path = dir.path().to_str().ok_or_eyre("temp dir path is not UTF-8")?;
    let source = JsonCatalogSource::open(path)?;
    Ok(CatalogService::load(&source, CatalogConfig::default(), Arc::new(clock)).await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_catalog_renders_overlays(clock: Result<FixedClock>) -> Result<()> {
    let dir = write_catalog_dir()?;
    let catalog = load(&dir, clock?).await?;
    let anmeldung = TaskId::new("anmeldung")?;

    let english = catalog
        .task(&anmeldung, Locale::En)
        .ok_or_eyre("anmeldung should exist")?;
    let turkish = catalog
        .task(&anmeldung, Locale::Tr)
        .ok_or_eyre("anmeldung should exist")?;
    let german = catalog
        .task(&anmeldung, Locale::De)
        .ok_or_eyre("anmeldung should exist")?;

    eyre::ensure!(english.title() == "Register your address", "english title");
    let subtask_titles: Vec<&str> = english.subtasks().iter().map(|s| s.title()).collect();
    eyre::ensure!(
        subtask_titles == ["Book an appointment", "Adres bul"],
        "got {subtask_titles:?}"
    );
    eyre::ensure!(turkish.title() == "anmeldung title", "base text for tr");
    eyre::ensure!(german.title() == turkish.title(), "missing overlay falls back");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_catalog_matches_in_memory_document(clock: Result<FixedClock>) -> Result<()> {
    let dir = write_catalog_dir()?;
    let clock = clock?;
    let loaded = load(&dir, clock).await?;

    let expected = relocation_document()?;
    eyre::ensure!(
        loaded.base_catalog().tasks() == expected.tasks.as_slice(),
        "tasks differ after loading from disk"
    );
    let phase_ids: Vec<&str> = loaded
        .phases()
        .iter()
        .map(|phase| phase.id().as_str())
        .collect();
    eyre::ensure!(
        phase_ids == ["pre_arrival", "week_1", "month_1", "later"],
        "got {phase_ids:?}"
    );
    eyre::ensure!(
        loaded.current_phase(Some(date(2026, 2, 1)?)).id().as_str() == "month_1",
        "28 days after arrival is month_1"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cyclic_directory_catalog_is_rejected(clock: Result<FixedClock>) -> Result<()> {
    let dir = write_catalog_dir()?;
    let document = fs::read_to_string(dir.path().join("tasks.json"))?;
    let mut raw: serde_json::Value = serde_json::from_str(&document)?;
    let housing = raw
        .pointer_mut("/tasks/0/dependencies")
        .ok_or_eyre("housing dependencies should be serialized")?;
    *housing = serde_json::json!(["open-bank-account"]);
    fs::write(dir.path().join("tasks.json"), serde_json::to_string(&raw)?)?;

    let path = dir.path().to_str().ok_or_eyre("temp dir path is not UTF-8")?;
    let source = JsonCatalogSource::open(path)?;
    let result = CatalogService::load(&source, CatalogConfig::default(), Arc::new(clock?)).await;

    let Err(CatalogServiceError::Catalog(err)) = result else {
        return Err(eyre::eyre!("expected a catalog error"));
    };
    eyre::ensure!(
        err.to_string()
            == "dependency cycle: find-housing -> open-bank-account -> anmeldung -> find-housing",
        "got {err}"
    );
    Ok(())
}
