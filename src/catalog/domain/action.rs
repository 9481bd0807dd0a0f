//! Action blocks: links, message templates, and document checklists that
//! help a traveller carry out a task.
//!
//! Blocks are authored separately from the task list and attached to their
//! task when the catalog is built. They carry no progress semantics.

use super::CityId;
use serde::{Deserialize, Serialize};

/// Category of an action link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionLinkKind {
    /// Government or authority portal.
    Official,
    /// Third-party tool or platform.
    Tool,
    /// Community group or forum.
    Community,
    /// Background reading.
    Info,
}

impl ActionLinkKind {
    /// Returns the canonical kind identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Tool => "tool",
            Self::Community => "community",
            Self::Info => "info",
        }
    }

    /// Returns whether the link points at an authority.
    #[must_use]
    pub const fn is_official(self) -> bool {
        matches!(self, Self::Official)
    }
}

/// External link offered alongside a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLink {
    id: String,
    label: String,
    url: String,
    #[serde(rename = "type")]
    kind: ActionLinkKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    city_scope: Vec<CityId>,
}

impl ActionLink {
    /// Creates a link that applies to every city.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        kind: ActionLinkKind,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            kind,
            city_scope: Vec::new(),
        }
    }

    /// Restricts the link to the given cities.
    #[must_use]
    pub fn with_city_scope(mut self, cities: impl IntoIterator<Item = CityId>) -> Self {
        self.city_scope = cities.into_iter().collect();
        self
    }

    /// Returns the link identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the link category.
    #[must_use]
    pub const fn kind(&self) -> ActionLinkKind {
        self.kind
    }

    /// Returns the city scope. Empty means every city.
    #[must_use]
    pub fn city_scope(&self) -> &[CityId] {
        &self.city_scope
    }

    /// Returns whether the link applies to the given city.
    #[must_use]
    pub fn applies_to_city(&self, city: &CityId) -> bool {
        self.city_scope.is_empty() || self.city_scope.contains(city)
    }
}

/// What a message template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePurpose {
    /// Landlord and flat-share enquiries.
    Housing,
    /// Job applications.
    Job,
    /// Letters to authorities.
    Bureaucracy,
    /// Introductions to groups.
    Social,
}

/// Message template the traveller can generate text from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    id: String,
    label: String,
    purpose: TemplatePurpose,
    #[serde(alias = "ai_prompt_key")]
    prompt_key: String,
}

impl TaskTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        purpose: TemplatePurpose,
        prompt_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            purpose,
            prompt_key: prompt_key.into(),
        }
    }

    /// Returns the template identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns what the template is for.
    #[must_use]
    pub const fn purpose(&self) -> TemplatePurpose {
        self.purpose
    }

    /// Returns the key of the text-generation prompt.
    #[must_use]
    pub fn prompt_key(&self) -> &str {
        &self.prompt_key
    }
}

/// Document the traveller should have ready for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklistItem {
    id: String,
    label: String,
    #[serde(default)]
    optional: bool,
}

impl DocumentChecklistItem {
    /// Creates a required checklist item.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            optional: false,
        }
    }

    /// Marks the document as nice to have.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Returns the item identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether the document can be skipped.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Links, templates, and documents attached to one task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionBlock {
    action_links: Vec<ActionLink>,
    templates: Vec<TaskTemplate>,
    document_checklist: Vec<DocumentChecklistItem>,
}

impl ActionBlock {
    /// Creates an empty block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the action links.
    #[must_use]
    pub fn with_action_links(mut self, links: impl IntoIterator<Item = ActionLink>) -> Self {
        self.action_links = links.into_iter().collect();
        self
    }

    /// Sets the message templates.
    #[must_use]
    pub fn with_templates(mut self, templates: impl IntoIterator<Item = TaskTemplate>) -> Self {
        self.templates = templates.into_iter().collect();
        self
    }

    /// Sets the document checklist.
    #[must_use]
    pub fn with_document_checklist(
        mut self,
        items: impl IntoIterator<Item = DocumentChecklistItem>,
    ) -> Self {
        self.document_checklist = items.into_iter().collect();
        self
    }

    /// Returns every action link in authored order.
    #[must_use]
    pub fn action_links(&self) -> &[ActionLink] {
        &self.action_links
    }

    /// Returns the links that apply to `city`.
    pub fn links_for_city<'a>(&'a self, city: &'a CityId) -> impl Iterator<Item = &'a ActionLink> {
        self.action_links
            .iter()
            .filter(move |link| link.applies_to_city(city))
    }

    /// Returns the message templates.
    #[must_use]
    pub fn templates(&self) -> &[TaskTemplate] {
        &self.templates
    }

    /// Returns the document checklist.
    #[must_use]
    pub fn document_checklist(&self) -> &[DocumentChecklistItem] {
        &self.document_checklist
    }

    /// Returns whether the block offers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.action_links.is_empty() && self.templates.is_empty() && self.document_checklist.is_empty()
    }
}
