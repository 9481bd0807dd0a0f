//! Task catalog for Landfall.
//!
//! Loads the canonical relocation task catalog, validates its dependency
//! graph at startup, renders it per locale by merging text overlays onto the
//! base language, and resolves the traveller's current journey phase. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
