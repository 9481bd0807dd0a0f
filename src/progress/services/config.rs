//! Progress service configuration.

use crate::progress::domain::DynamicTaskDefaults;
use serde::{Deserialize, Serialize};

/// Configuration for the task progress service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Catalog fields given to dynamic tasks that do not carry their own.
    pub dynamic_task_defaults: DynamicTaskDefaults,
    /// Prefix of generated dynamic task identifiers.
    pub dynamic_task_id_prefix: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            dynamic_task_defaults: DynamicTaskDefaults::default(),
            dynamic_task_id_prefix: String::from("dynamic-"),
        }
    }
}
