//! Identifier types for catalog entries.
//!
//! Catalog identifiers are human-authored slugs (for example
//! `anmeldung-icin-randevu-al` or `define_budget`). They are trimmed on
//! construction and must not be empty.

use super::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! catalog_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`CatalogError::InvalidIdentifier`] when the value is
            /// empty after trimming.
            pub fn new(value: impl Into<String>) -> Result<Self, CatalogError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CatalogError::InvalidIdentifier {
                        kind: $kind,
                        value: raw,
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CatalogError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CatalogError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

catalog_identifier!(
    /// Stable identifier of a catalog task or a dynamic task.
    TaskId,
    "task"
);

catalog_identifier!(
    /// Identifier of a subtask, unique within its parent task.
    SubtaskId,
    "subtask"
);

catalog_identifier!(
    /// Identifier of a journey phase (for example `pre_arrival`).
    PhaseId,
    "phase"
);

catalog_identifier!(
    /// Identifier of a city a task can be scoped to.
    CityId,
    "city"
);

catalog_identifier!(
    /// Identifier of a user persona (for example `student`).
    PersonaId,
    "persona"
);

impl PhaseId {
    /// Phase assigned to dynamic tasks that do not name one.
    #[must_use]
    pub(crate) fn first_week() -> Self {
        Self(String::from("week_1"))
    }
}
