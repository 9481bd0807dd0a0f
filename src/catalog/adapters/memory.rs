//! In-memory catalog source for tests and embedded catalogs.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::catalog::{
    domain::{CatalogDocument, Locale, LocaleOverlay},
    ports::{CatalogSource, CatalogSourceResult},
};

/// Catalog source serving a document and overlays held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    document: CatalogDocument,
    overlays: HashMap<Locale, LocaleOverlay>,
}

impl InMemoryCatalogSource {
    /// Creates a source serving the given document and no overlays.
    #[must_use]
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document,
            overlays: HashMap::new(),
        }
    }

    /// Adds or replaces the overlay served for a locale.
    #[must_use]
    pub fn with_overlay(mut self, locale: Locale, overlay: LocaleOverlay) -> Self {
        self.overlays.insert(locale, overlay);
        self
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load_document(&self) -> CatalogSourceResult<CatalogDocument> {
        Ok(self.document.clone())
    }

    async fn load_overlay(&self, locale: Locale) -> CatalogSourceResult<Option<LocaleOverlay>> {
        Ok(self.overlays.get(&locale).cloned())
    }
}
