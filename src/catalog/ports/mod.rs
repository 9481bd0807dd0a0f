//! Port contracts for catalog loading.
//!
//! Ports define infrastructure-agnostic interfaces used by catalog services.

pub mod source;

pub use source::{CatalogSource, CatalogSourceError, CatalogSourceResult};

#[cfg(test)]
pub use source::MockCatalogSource;
