//! Submission pipeline for generator tabs: validation, form assembly and the
//! network round-trip.
//!
//! The caller owns the output pane. It moves the pane to loading before
//! calling [`assemble`], sends the resulting [`PendingSubmission`] and applies
//! the [`SubmissionOutcome`] afterwards, so a request can stay in flight while
//! the user switches tabs.

use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::session::draft::{ResumeFile, SessionDraft};
use crate::views::composer::{GeneratorPanel, EXPERIENCE_FIELD};
use crate::views::tabs::TabId;

pub const EMPTY_JOB_DESCRIPTION: &str = "Job Description cannot be empty.";
pub const MISSING_RESUME: &str = "Please upload your resume PDF.";
pub const MISSING_PORTFOLIO_RESUME: &str = "Please upload a resume to generate a portfolio.";
pub const MISSING_EXPERIENCE: &str = "Describe your experience before requesting coaching.";

const RESUME_MIME: &str = "application/pdf";

/// Everything needed to issue one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub tab: TabId,
    pub endpoint: &'static str,
    /// Text parts, in form order.
    pub fields: Vec<(&'static str, String)>,
    pub resume: Option<ResumeFile>,
}

impl SubmissionRequest {
    fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        let mut fields = self.fields.into_iter();

        // jobDescription first, then the file, then tab-specific fields.
        if let Some((name, value)) = fields.next() {
            form = form.text(name, value);
        }
        if let Some(resume) = self.resume {
            let part = Part::bytes(resume.bytes.to_vec())
                .file_name(resume.file_name)
                .mime_str(RESUME_MIME)?;
            form = form.part("resume", part);
        }
        for (name, value) in fields {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Checks the draft and panel against the tab's requirements.
pub fn validate(panel: &GeneratorPanel, draft: &SessionDraft) -> Result<(), ClientError> {
    let tab = panel.tab();
    let required = tab.descriptor().required;

    if required.job_description && draft.job_description().trim().is_empty() {
        return Err(ClientError::validation(EMPTY_JOB_DESCRIPTION));
    }
    if required.resume && draft.resume().is_none() {
        let message = if tab == TabId::Portfolio {
            MISSING_PORTFOLIO_RESUME
        } else {
            MISSING_RESUME
        };
        return Err(ClientError::validation(message));
    }
    if tab == TabId::StarCoach
        && panel
            .text(EXPERIENCE_FIELD)
            .map_or(true, |text| text.trim().is_empty())
    {
        return Err(ClientError::validation(MISSING_EXPERIENCE));
    }
    Ok(())
}

/// Validates and assembles the request for the panel's tab.
pub fn assemble(panel: &GeneratorPanel, draft: &SessionDraft) -> Result<SubmissionRequest, ClientError> {
    validate(panel, draft)?;

    let tab = panel.tab();
    let endpoint = tab
        .descriptor()
        .endpoint
        .ok_or_else(|| ClientError::NotFound(format!("The {tab} tab has no endpoint")))?;

    let mut fields = vec![("jobDescription", draft.job_description().to_string())];
    fields.extend(panel.extra_fields());

    Ok(SubmissionRequest {
        tab,
        endpoint,
        fields,
        resume: draft.resume().cloned(),
    })
}

/// A validated request waiting to be sent. Owns everything it needs, so it
/// can be awaited independently of the view that created it.
#[derive(Debug)]
pub struct PendingSubmission {
    sequence: u64,
    request: SubmissionRequest,
    api: ApiClient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub tab: TabId,
    pub sequence: u64,
    pub result: Result<String, ClientError>,
}

impl PendingSubmission {
    pub fn new(api: ApiClient, request: SubmissionRequest, sequence: u64) -> Self {
        Self {
            sequence,
            request,
            api,
        }
    }

    pub fn tab(&self) -> TabId {
        self.request.tab
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub async fn send(self) -> SubmissionOutcome {
        let tab = self.request.tab;
        let endpoint = self.request.endpoint;
        debug!(
            "Submitting {tab} #{} to {endpoint} ({} fields, resume: {})",
            self.sequence,
            self.request.fields.len(),
            self.request.resume.is_some()
        );

        let result = match self.request.into_form() {
            Ok(form) => self.api.post_form(endpoint, form).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(content) => info!("{tab} #{} succeeded ({} chars)", self.sequence, content.len()),
            Err(err) => warn!("{tab} #{} failed: {} {err}", self.sequence, err.code()),
        }

        SubmissionOutcome {
            tab,
            sequence: self.sequence,
            result,
        }
    }
}
