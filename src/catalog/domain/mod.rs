//! Domain model for the task catalog.
//!
//! The catalog is the immutable set of predefined relocation tasks, their
//! subtask definitions and action blocks, the journey phases they are
//! scheduled in, the city and module registries, and the per-locale text
//! overlays applied on top of the base language.

mod action;
mod catalog;
mod error;
mod ids;
mod locale;
mod overlay;
mod phase;
mod registry;
mod subtask;
mod task;

pub use action::{
    ActionBlock, ActionLink, ActionLinkKind, DocumentChecklistItem, TaskTemplate, TemplatePurpose,
};
pub use catalog::{Catalog, CatalogDocument};
pub use error::{CatalogError, ParseLocaleError};
pub use ids::{CityId, PersonaId, PhaseId, SubtaskId, TaskId};
pub use locale::{Locale, TextDirection};
pub use overlay::{LocaleOverlay, SubtaskOverlay, TaskOverlay, merge_overlay};
pub use phase::{JourneyPhase, JourneyPhases, current_phase};
pub use registry::{City, ModuleInfo, Registry};
pub use subtask::{Subtask, SubtaskKind};
pub use task::{Importance, Task, TaskDefinition, TaskModule};

pub(crate) use task::TranslatedText;
