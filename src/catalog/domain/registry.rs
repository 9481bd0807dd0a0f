//! Reference lists of cities and modules shipped with the catalog.

use super::{CatalogError, CityId, TaskModule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// A destination city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    id: CityId,
    name: String,
}

impl City {
    /// Creates a city entry.
    #[must_use]
    pub fn new(id: CityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the city identifier.
    #[must_use]
    pub const fn id(&self) -> &CityId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Display metadata for a task module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    id: TaskModule,
    label: String,
}

impl ModuleInfo {
    /// Creates a module entry.
    #[must_use]
    pub fn new(id: TaskModule, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Returns the module.
    #[must_use]
    pub const fn id(&self) -> TaskModule {
        self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Validated city and module lists in authored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    cities: Vec<City>,
    modules: Vec<ModuleInfo>,
}

impl Registry {
    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCity`] or
    /// [`CatalogError::DuplicateModule`] when an entry is listed twice.
    pub fn new(
        city_entries: impl IntoIterator<Item = City>,
        module_entries: impl IntoIterator<Item = ModuleInfo>,
    ) -> Result<Self, CatalogError> {
        let cities: Vec<City> = city_entries.into_iter().collect();
        if let Some(repeated) = first_repeat(cities.iter().map(City::id)) {
            return Err(CatalogError::DuplicateCity(repeated.clone()));
        }
        let modules: Vec<ModuleInfo> = module_entries.into_iter().collect();
        if let Some(repeated) = first_repeat(modules.iter().map(ModuleInfo::id)) {
            return Err(CatalogError::DuplicateModule(repeated));
        }
        Ok(Self { cities, modules })
    }

    /// Returns every city.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Looks up a city.
    #[must_use]
    pub fn city(&self, id: &CityId) -> Option<&City> {
        self.cities.iter().find(|city| city.id() == id)
    }

    /// Returns every module entry.
    #[must_use]
    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    /// Looks up the entry for a module.
    #[must_use]
    pub fn module(&self, id: TaskModule) -> Option<&ModuleInfo> {
        self.modules.iter().find(|module| module.id() == id)
    }
}

fn first_repeat<T: Clone + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(item.clone()))
}
