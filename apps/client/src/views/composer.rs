//! View composer: builds the whole panel for a tab from the draft.
//!
//! `compose` is pure: the same tab and draft always give the same panel.
//! Every tab switch throws the previous panel away and composes a new one,
//! so nothing view-local (gallery selection, document type, STAR answers)
//! survives a switch. Only the draft does.

use crate::errors::ClientError;
use crate::output::machine::OutputMachine;
use crate::session::draft::SessionDraft;
use crate::tracker::view::TrackerPanel;
use crate::views::gallery::{DocType, Gallery, GalleryKind};
use crate::views::tabs::TabId;

pub const TARGET_ROLE_FIELD: &str = "targetRole";
pub const QUESTION_FIELD: &str = "question";
pub const EXPERIENCE_FIELD: &str = "experience";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    JobDescription {
        text: String,
    },
    ResumeUpload {
        input_id: &'static str,
        file_label: String,
    },
    Text {
        name: &'static str,
        label: &'static str,
        value: String,
        multiline: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOptions {
    None,
    Generate { doc_type: DocType, levels: Gallery },
    AtsTemplates(Gallery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPanel {
    tab: TabId,
    heading: &'static str,
    fields: Vec<Field>,
    options: PanelOptions,
    output: OutputMachine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Generator(GeneratorPanel),
    Tracker(TrackerPanel),
}

pub fn compose(tab: TabId, draft: &SessionDraft) -> Panel {
    if !tab.is_generator() {
        return Panel::Tracker(TrackerPanel::new());
    }

    let descriptor = tab.descriptor();
    let mut fields = Vec::new();

    if descriptor.required.job_description {
        fields.push(Field::JobDescription {
            text: draft.job_description().to_string(),
        });
    }
    if descriptor.required.resume {
        fields.push(Field::ResumeUpload {
            input_id: if tab == TabId::Portfolio {
                "portfolio-resume-upload"
            } else {
                "resume-upload"
            },
            file_label: draft.resume_file_label().to_string(),
        });
    }

    match tab {
        TabId::SkillGap => fields.push(text_field(TARGET_ROLE_FIELD, "Target Role (optional)", false)),
        TabId::StarCoach => {
            fields.push(text_field(QUESTION_FIELD, "Interview Question", false));
            fields.push(text_field(EXPERIENCE_FIELD, "Your Experience", true));
        }
        _ => {}
    }

    let options = match tab {
        TabId::Generate => PanelOptions::Generate {
            doc_type: DocType::default(),
            levels: Gallery::loading(GalleryKind::ExperienceLevel),
        },
        TabId::Templates => PanelOptions::AtsTemplates(Gallery::loading(GalleryKind::AtsTemplate)),
        _ => PanelOptions::None,
    };

    let output = match draft.output(tab) {
        Some(text) => OutputMachine::restored(tab, text),
        None => OutputMachine::idle(tab),
    };

    Panel::Generator(GeneratorPanel {
        tab,
        heading: heading(tab),
        fields,
        options,
        output,
    })
}

fn text_field(name: &'static str, label: &'static str, multiline: bool) -> Field {
    Field::Text {
        name,
        label,
        value: String::new(),
        multiline,
    }
}

fn heading(tab: TabId) -> &'static str {
    match tab {
        TabId::Portfolio => "Create a Professional Portfolio Website",
        TabId::Templates => "Choose an ATS Template",
        TabId::StarCoach => "Practice with the STAR Method",
        other => other.descriptor().label,
    }
}

impl Panel {
    pub fn tab(&self) -> TabId {
        match self {
            Panel::Generator(panel) => panel.tab,
            Panel::Tracker(_) => TabId::Tracker,
        }
    }

    pub fn as_generator(&self) -> Option<&GeneratorPanel> {
        match self {
            Panel::Generator(panel) => Some(panel),
            Panel::Tracker(_) => None,
        }
    }

    pub fn as_generator_mut(&mut self) -> Option<&mut GeneratorPanel> {
        match self {
            Panel::Generator(panel) => Some(panel),
            Panel::Tracker(_) => None,
        }
    }

    pub fn as_tracker_mut(&mut self) -> Option<&mut TrackerPanel> {
        match self {
            Panel::Tracker(panel) => Some(panel),
            Panel::Generator(_) => None,
        }
    }
}

impl GeneratorPanel {
    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn heading(&self) -> &'static str {
        self.heading
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn action_label(&self) -> &'static str {
        self.tab.descriptor().action_label
    }

    pub fn output(&self) -> &OutputMachine {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputMachine {
        &mut self.output
    }

    pub fn submit_enabled(&self) -> bool {
        self.output.submit_enabled()
    }

    pub fn gallery(&self) -> Option<&Gallery> {
        match &self.options {
            PanelOptions::Generate { levels, .. } => Some(levels),
            PanelOptions::AtsTemplates(gallery) => Some(gallery),
            PanelOptions::None => None,
        }
    }

    pub fn gallery_mut(&mut self) -> Option<&mut Gallery> {
        match &mut self.options {
            PanelOptions::Generate { levels, .. } => Some(levels),
            PanelOptions::AtsTemplates(gallery) => Some(gallery),
            PanelOptions::None => None,
        }
    }

    pub fn doc_type(&self) -> Option<DocType> {
        match &self.options {
            PanelOptions::Generate { doc_type, .. } => Some(*doc_type),
            _ => None,
        }
    }

    pub fn set_doc_type(&mut self, value: DocType) -> Result<(), ClientError> {
        match &mut self.options {
            PanelOptions::Generate { doc_type, .. } => {
                *doc_type = value;
                Ok(())
            }
            _ => Err(ClientError::NotFound(format!(
                "The {} tab has no document type selector",
                self.tab
            ))),
        }
    }

    /// Mirrors the draft's job description into the rendered field, if any.
    pub fn set_job_description(&mut self, value: &str) {
        for field in &mut self.fields {
            if let Field::JobDescription { text } = field {
                *text = value.to_string();
            }
        }
    }

    /// Updates every upload field's file-name display.
    pub fn set_file_label(&mut self, label: &str) {
        for field in &mut self.fields {
            if let Field::ResumeUpload { file_label, .. } = field {
                *file_label = label.to_string();
            }
        }
    }

    pub fn set_text(&mut self, name: &str, new_value: impl Into<String>) -> Result<(), ClientError> {
        let field = self.fields.iter_mut().find_map(|field| match field {
            Field::Text {
                name: field_name,
                value,
                ..
            } if *field_name == name => Some(value),
            _ => None,
        });
        match field {
            Some(value) => {
                *value = new_value.into();
                Ok(())
            }
            None => Err(ClientError::NotFound(format!(
                "The {} tab has no '{name}' field",
                self.tab
            ))),
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match field {
            Field::Text {
                name: field_name,
                value,
                ..
            } if *field_name == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether the panel shows a template gallery that still has to be filled.
    pub fn needs_catalog(&self) -> bool {
        self.gallery().is_some()
    }

    /// Tab-specific form fields, in submission order.
    pub fn extra_fields(&self) -> Vec<(&'static str, String)> {
        let mut extra = Vec::new();
        match &self.options {
            PanelOptions::Generate { doc_type, levels } => {
                extra.push(("docType", doc_type.as_str().to_string()));
                extra.push((levels.kind().field_name(), levels.hidden_value()));
            }
            PanelOptions::AtsTemplates(gallery) => {
                extra.push((gallery.kind().field_name(), gallery.hidden_value()));
                extra.push((
                    "templateName",
                    gallery.selected().map(|t| t.name.clone()).unwrap_or_default(),
                ));
            }
            PanelOptions::None => {}
        }
        for field in &self.fields {
            if let Field::Text { name, value, .. } = field {
                extra.push((*name, value.clone()));
            }
        }
        extra
    }
}
