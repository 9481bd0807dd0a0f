//! Task progress for Landfall.
//!
//! Tracks each user's status, notes and subtask signals per task, derives
//! status transitions from those signals, reports unfinished dependencies,
//! and lists the tasks visible under a filter. The module follows
//! hexagonal architecture:
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
