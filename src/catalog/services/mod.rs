//! Application services for catalog loading and locale-aware lookup.

mod catalog;
mod config;

pub use catalog::{CatalogService, CatalogServiceError, CatalogServiceResult};
pub use config::CatalogConfig;
