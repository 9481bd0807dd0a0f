//! Catalog loading, locale overlay caching, and phase lookup.

use crate::catalog::{
    domain::{
        Catalog, CatalogDocument, CatalogError, City, CityId, JourneyPhase, JourneyPhases, Locale,
        LocaleOverlay, ModuleInfo, PhaseId, Registry, Task, TaskId, TaskModule, merge_overlay,
    },
    ports::{CatalogSource, CatalogSourceError},
    services::CatalogConfig,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for catalog loading.
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    /// The catalog violates a structural invariant.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The catalog source failed.
    #[error(transparent)]
    Source(#[from] CatalogSourceError),
}

/// Result type for catalog service operations.
pub type CatalogServiceResult<T> = Result<T, CatalogServiceError>;

/// Per-locale cache of merged catalogs.
///
/// Entries are computed on first request and never invalidated; the inputs
/// they are derived from are immutable for the lifetime of the service.
#[derive(Debug, Default)]
struct OverlayCache {
    merged: RwLock<HashMap<Locale, Arc<Catalog>>>,
}

impl OverlayCache {
    fn get_or_merge(&self, locale: Locale, merge: impl FnOnce() -> Catalog) -> Arc<Catalog> {
        {
            let merged = self.merged.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(hit) = merged.get(&locale) {
                return Arc::clone(hit);
            }
        }

        debug!(locale = %locale, "merging catalog overlay");
        let fresh = Arc::new(merge());
        let mut merged = self.merged.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(merged.entry(locale).or_insert(fresh))
    }

    fn contains(&self, locale: Locale) -> bool {
        self.merged
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&locale)
    }
}

/// Locale-aware access to the immutable task catalog.
///
/// The service is constructed once at startup and shared by reference; all
/// structural validation happens during construction.
pub struct CatalogService<C>
where
    C: Clock + Send + Sync,
{
    base: Arc<Catalog>,
    phases: JourneyPhases,
    registry: Registry,
    overlays: HashMap<Locale, LocaleOverlay>,
    cache: OverlayCache,
    config: CatalogConfig,
    clock: Arc<C>,
}

impl<C> CatalogService<C>
where
    C: Clock + Send + Sync,
{
    /// Loads and validates the catalog from a source.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Source`] when the source fails and
    /// [`CatalogServiceError::Catalog`] when the catalog is invalid.
    pub async fn load<S>(
        source: &S,
        config: CatalogConfig,
        clock: Arc<C>,
    ) -> CatalogServiceResult<Self>
    where
        S: CatalogSource + ?Sized,
    {
        let document = source.load_document().await?;

        let mut overlays = HashMap::new();
        if config.preload_overlays {
            for locale in Locale::SUPPORTED {
                if locale == config.base_locale {
                    continue;
                }
                let Some(overlay) = source.load_overlay(locale).await? else {
                    warn!(locale = %locale, "no overlay found; serving base text");
                    continue;
                };
                overlays.insert(locale, overlay);
            }
        }

        Ok(Self::from_parts(document, overlays, config, clock)?)
    }

    /// Builds the service from already loaded catalog data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the document violates a catalog
    /// invariant.
    pub fn from_parts(
        document: CatalogDocument,
        overlays: HashMap<Locale, LocaleOverlay>,
        config: CatalogConfig,
        clock: Arc<C>,
    ) -> Result<Self, CatalogError> {
        let CatalogDocument {
            journey_phases,
            tasks,
            cities,
            modules,
            action_blocks,
        } = document;
        let phases = JourneyPhases::new(journey_phases)?;
        let registry = Registry::new(cities, modules)?;
        let action_block_count = action_blocks.len();
        let base = Catalog::new(tasks)?.with_action_blocks(action_blocks)?;

        info!(
            tasks = base.len(),
            phases = phases.iter().count(),
            cities = registry.cities().len(),
            action_blocks = action_block_count,
            overlays = overlays.len(),
            base_locale = %config.base_locale,
            "task catalog loaded"
        );

        Ok(Self {
            base: Arc::new(base),
            phases,
            registry,
            overlays,
            cache: OverlayCache::default(),
            config,
            clock,
        })
    }

    /// Returns the service configuration.
    #[must_use]
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the catalog in its base language.
    #[must_use]
    pub fn base_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.base)
    }

    /// Returns the catalog rendered for `locale`.
    ///
    /// Locales without an overlay share the base catalog.
    #[must_use]
    pub fn catalog(&self, locale: Locale) -> Arc<Catalog> {
        if locale == self.config.base_locale {
            return self.base_catalog();
        }
        self.overlays.get(&locale).map_or_else(
            || self.base_catalog(),
            |overlay| {
                self.cache
                    .get_or_merge(locale, || merge_overlay(&self.base, overlay))
            },
        )
    }

    /// Returns whether a merged catalog for `locale` has been cached.
    #[must_use]
    pub fn is_cached(&self, locale: Locale) -> bool {
        self.cache.contains(locale)
    }

    /// Returns every task rendered for `locale`.
    #[must_use]
    pub fn tasks(&self, locale: Locale) -> Vec<Task> {
        self.catalog(locale).tasks().to_vec()
    }

    /// Looks up a task rendered for `locale`.
    ///
    /// Returns `None` when the catalog does not define the task.
    #[must_use]
    pub fn task(&self, id: &TaskId, locale: Locale) -> Option<Task> {
        self.catalog(locale).get(id).cloned()
    }

    /// Returns the dependencies of a task in declared order.
    #[must_use]
    pub fn dependencies_of(&self, id: &TaskId, locale: Locale) -> Vec<Task> {
        self.catalog(locale)
            .dependencies_of(id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the tasks that depend on `id`.
    #[must_use]
    pub fn dependents_of(&self, id: &TaskId, locale: Locale) -> Vec<Task> {
        self.catalog(locale)
            .dependents_of(id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the destination cities.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        self.registry.cities()
    }

    /// Looks up a destination city.
    #[must_use]
    pub fn city(&self, id: &CityId) -> Option<&City> {
        self.registry.city(id)
    }

    /// Returns the module display entries.
    #[must_use]
    pub fn modules(&self) -> &[ModuleInfo] {
        self.registry.modules()
    }

    /// Looks up the display entry of a module.
    #[must_use]
    pub fn module(&self, id: TaskModule) -> Option<&ModuleInfo> {
        self.registry.module(id)
    }

    /// Returns the journey phases in ascending order.
    ///
    /// Phases double as the time-window registry; their label keys name
    /// the window labels.
    #[must_use]
    pub const fn phases(&self) -> &JourneyPhases {
        &self.phases
    }

    /// Looks up a journey phase by identifier.
    #[must_use]
    pub fn phase(&self, id: &PhaseId) -> Option<&JourneyPhase> {
        self.phases.get(id)
    }

    /// Resolves the current phase for an arrival date using the service
    /// clock.
    #[must_use]
    pub fn current_phase(&self, arrival: Option<NaiveDate>) -> &JourneyPhase {
        self.current_phase_on(arrival, self.clock.utc().date_naive())
    }

    /// Resolves the phase for an arrival date as seen on `today`.
    #[must_use]
    pub fn current_phase_on(&self, arrival: Option<NaiveDate>, today: NaiveDate) -> &JourneyPhase {
        self.phases.current(arrival, today)
    }
}
