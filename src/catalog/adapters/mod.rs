//! Adapter implementations for catalog ports.

pub mod json;
pub mod memory;
