//! Unit tests for the progress module.
