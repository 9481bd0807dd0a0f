//! Step definitions for task status progression scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
