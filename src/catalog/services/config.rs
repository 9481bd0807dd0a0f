//! Catalog service configuration.

use crate::catalog::domain::Locale;
use serde::{Deserialize, Serialize};

/// Configuration for loading and serving the task catalog.
///
/// # Examples
///
/// ```
/// use landfall::catalog::{domain::Locale, services::CatalogConfig};
///
/// let config = CatalogConfig::default();
/// assert_eq!(config.base_locale, Locale::Tr);
/// assert!(config.preload_overlays);
///
/// let english = CatalogConfig::with_base_locale(Locale::En);
/// assert_eq!(english.base_locale, Locale::En);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Language the base catalog document is authored in.
    ///
    /// Requests for this locale are served from the base catalog without
    /// consulting an overlay.
    pub base_locale: Locale,
    /// Whether every supported overlay is fetched while loading.
    ///
    /// When disabled, only the base catalog is available and every locale
    /// falls back to base text.
    pub preload_overlays: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_locale: Locale::Tr,
            preload_overlays: true,
        }
    }
}

impl CatalogConfig {
    /// Creates a configuration for a catalog authored in `locale`.
    #[must_use]
    pub fn with_base_locale(locale: Locale) -> Self {
        Self {
            base_locale: locale,
            ..Self::default()
        }
    }
}
