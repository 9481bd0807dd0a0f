//! Source port for the base catalog document and locale overlays.

use crate::catalog::domain::{CatalogDocument, Locale, LocaleOverlay};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for catalog source operations.
pub type CatalogSourceResult<T> = Result<T, CatalogSourceError>;

/// Read-only provider of catalog configuration data.
///
/// Sources are read once at process start; nothing is written back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads the base-language catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogSourceError`] when the document cannot be read or
    /// parsed.
    async fn load_document(&self) -> CatalogSourceResult<CatalogDocument>;

    /// Loads the text overlay for a locale.
    ///
    /// Returns `None` when the source has no overlay for the locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogSourceError`] when an existing overlay cannot be
    /// read or parsed.
    async fn load_overlay(&self, locale: Locale) -> CatalogSourceResult<Option<LocaleOverlay>>;
}

/// Errors returned by catalog source implementations.
#[derive(Debug, Clone, Error)]
pub enum CatalogSourceError {
    /// The data was readable but not a valid catalog document or overlay.
    #[error("malformed catalog data in {location}: {source}")]
    Malformed {
        /// Where the malformed data came from.
        location: String,
        /// Underlying parse error.
        source: Arc<serde_json::Error>,
    },

    /// Reading the underlying storage failed.
    #[error("failed to read {location}: {source}")]
    Io {
        /// What was being read.
        location: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The source could not serve the request for another reason.
    #[error("catalog source unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CatalogSourceError {
    /// Wraps a parse error for the given location.
    pub fn malformed(location: impl Into<String>, err: serde_json::Error) -> Self {
        Self::Malformed {
            location: location.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps an I/O error for the given location.
    pub fn io(location: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            location: location.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps any other source failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
