//! Landfall: relocation task progression engine.
//!
//! This crate provides the core of a relocation checklist: a validated task
//! catalog rendered per locale, journey phases keyed to the arrival date,
//! and per-user progress records whose status is derived from subtask
//! signals.
//!
//! # Architecture
//!
//! Landfall follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (JSON files, memory)
//!
//! # Modules
//!
//! - [`catalog`]: Task catalog loading, locale overlays, and journey phases
//! - [`progress`]: User task records, filtering, and status derivation

pub mod catalog;
pub mod progress;

#[cfg(test)]
mod test_support;
