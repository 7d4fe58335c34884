//! Selectable option groups: template galleries and the document-type switch.
//!
//! Selection is an explicit index on the gallery. Cards are derived from it
//! on every render, so exactly one card is marked selected at a time.

use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;
use crate::models::template::Template;

/// Which form field a gallery feeds, and with which template attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKind {
    /// Generate tab: submits the selected template's name.
    ExperienceLevel,
    /// ATS templates tab: submits the selected template's content.
    AtsTemplate,
}

impl GalleryKind {
    pub fn field_name(self) -> &'static str {
        match self {
            GalleryKind::ExperienceLevel => "experienceLevel",
            GalleryKind::AtsTemplate => "templateContent",
        }
    }

    pub fn loading_text(self) -> &'static str {
        match self {
            GalleryKind::ExperienceLevel => "Loading styles...",
            GalleryKind::AtsTemplate => "Loading templates...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    /// Inline error text shown in place of the cards.
    Failed(String),
}

/// A card as rendered in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    kind: GalleryKind,
    status: CatalogStatus,
    templates: Vec<Template>,
    selected: Option<usize>,
}

impl Gallery {
    pub fn loading(kind: GalleryKind) -> Self {
        Self {
            kind,
            status: CatalogStatus::Loading,
            templates: Vec::new(),
            selected: None,
        }
    }

    pub fn kind(&self) -> GalleryKind {
        self.kind
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// Fills the gallery; the first template becomes the default selection.
    pub fn populate(&mut self, templates: Vec<Template>) {
        self.selected = if templates.is_empty() { None } else { Some(0) };
        self.templates = templates;
        self.status = CatalogStatus::Ready;
    }

    /// Shows `message` inline and leaves nothing selected, so a later
    /// submission sends an empty value instead of blocking.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.templates.clear();
        self.selected = None;
        self.status = CatalogStatus::Failed(message.into());
    }

    pub fn select(&mut self, index: usize) -> Result<&Template, ClientError> {
        if index >= self.templates.len() {
            return Err(ClientError::NotFound(format!(
                "No template card at position {index}"
            )));
        }
        self.selected = Some(index);
        Ok(&self.templates[index])
    }

    /// Selects the first card carrying `name`.
    pub fn select_by_name(&mut self, name: &str) -> Result<&Template, ClientError> {
        let index = self
            .templates
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| ClientError::NotFound(format!("No template named '{name}'")))?;
        self.select(index)
    }

    pub fn selected(&self) -> Option<&Template> {
        self.selected.and_then(|i| self.templates.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Value of the hidden form field this gallery feeds. Empty when nothing
    /// is selected.
    pub fn hidden_value(&self) -> String {
        match (self.kind, self.selected()) {
            (GalleryKind::ExperienceLevel, Some(t)) => t.name.clone(),
            (GalleryKind::AtsTemplate, Some(t)) => t.content.clone(),
            (_, None) => String::new(),
        }
    }

    pub fn cards(&self) -> Vec<Card<'_>> {
        self.templates
            .iter()
            .enumerate()
            .map(|(i, t)| Card {
                name: &t.name,
                description: &t.description,
                selected: self.selected == Some(i),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocType {
    #[default]
    Resume,
    Cv,
}

impl DocType {
    pub const ALL: [DocType; 2] = [DocType::Resume, DocType::Cv];

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Resume => "Resume",
            DocType::Cv => "CV",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::validation(format!("Unknown document type '{s}'")))
    }
}
