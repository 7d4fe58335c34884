//! The page: one draft store, one visible panel, and the collaborators every
//! user action is routed through.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Url;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api_client::ApiClient;
use crate::browser::{
    Clipboard, Confirm, HandoffStore, Navigator, PORTFOLIO_KEY, PORTFOLIO_PREVIEW_PATH,
    PREVIEW_KEY, PREVIEW_PATH,
};
use crate::errors::ClientError;
use crate::models::job::{JobApplicationDraft, JobId};
use crate::output::export::{export, ExportFormat, ExportedFile};
use crate::output::machine::{OutputMachine, OutputState, COPY_LABEL};
use crate::session::draft::{ResumeFile, SharedDraft};
use crate::submission::pipeline::{assemble, PendingSubmission, SubmissionOutcome};
use crate::tracker::view::TrackerPanel;
use crate::views::composer::{compose, GeneratorPanel, Panel};
use crate::views::gallery::DocType;
use crate::views::tabs::TabId;

const CATALOG_ERROR: &str = "Failed to fetch templates.";

/// Browser-side collaborators injected into the page.
#[derive(Clone)]
pub struct Browser {
    pub clipboard: Arc<dyn Clipboard>,
    pub navigator: Arc<dyn Navigator>,
    pub confirm: Arc<dyn Confirm>,
}

pub struct App {
    api: ApiClient,
    draft: SharedDraft,
    handoff: HandoffStore,
    browser: Browser,
    preview_base: Url,
    panel: Panel,
}

impl App {
    /// A fresh page session showing the generate tab. The template catalog
    /// is not fetched until [`App::switch_tab`] or [`App::load_catalog`].
    pub fn new(api: ApiClient, preview_base: Url, browser: Browser) -> Self {
        let draft = SharedDraft::new();
        let panel = compose(TabId::Generate, &draft.snapshot());
        Self {
            api,
            draft,
            handoff: HandoffStore::default(),
            browser,
            preview_base,
            panel,
        }
    }

    pub fn active_tab(&self) -> TabId {
        self.panel.tab()
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn draft(&self) -> &SharedDraft {
        &self.draft
    }

    pub fn handoff(&self) -> &HandoffStore {
        &self.handoff
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn generator(&self) -> Result<&GeneratorPanel, ClientError> {
        self.panel.as_generator().ok_or_else(|| {
            ClientError::NotFound(format!("The {} tab has no generator form", self.active_tab()))
        })
    }

    fn generator_mut(&mut self) -> Result<&mut GeneratorPanel, ClientError> {
        let tab = self.active_tab();
        self.panel
            .as_generator_mut()
            .ok_or_else(|| ClientError::NotFound(format!("The {tab} tab has no generator form")))
    }

    fn tracker_mut(&mut self) -> Result<&mut TrackerPanel, ClientError> {
        self.panel
            .as_tracker_mut()
            .ok_or_else(|| ClientError::NotFound("The job tracker is not open".to_string()))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Tab switching
    // ────────────────────────────────────────────────────────────────────────

    /// Replaces the visible panel with a freshly composed one for `tab`.
    pub fn render_tab(&mut self, tab: TabId) {
        info!("Switching to {tab} tab");
        self.panel = compose(tab, &self.draft.snapshot());
    }

    /// Renders `tab` and fills whatever it loads asynchronously (template
    /// catalog, tracker list). Catalog failures are shown inline, not returned.
    pub async fn switch_tab(&mut self, tab: TabId) -> Result<(), ClientError> {
        self.render_tab(tab);
        if let Panel::Tracker(panel) = &mut self.panel {
            return panel.reload(&self.api).await;
        }
        if self
            .panel
            .as_generator()
            .map_or(false, GeneratorPanel::needs_catalog)
        {
            self.load_catalog().await;
        }
        Ok(())
    }

    /// Fetches templates into the visible gallery, if the panel has one.
    pub async fn load_catalog(&mut self) {
        let result = self.api.get_templates().await;
        let Some(gallery) = self.panel.as_generator_mut().and_then(GeneratorPanel::gallery_mut)
        else {
            return;
        };
        match result {
            Ok(templates) => {
                debug!("Populating {:?} gallery with {} templates", gallery.kind(), templates.len());
                gallery.populate(templates);
            }
            Err(err) => {
                warn!("Template catalog unavailable: {err}");
                gallery.fail(CATALOG_ERROR);
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Input events
    // ────────────────────────────────────────────────────────────────────────

    pub fn type_job_description(&mut self, text: &str) {
        self.draft.set_job_description(text);
        if let Some(panel) = self.panel.as_generator_mut() {
            panel.set_job_description(text);
        }
    }

    /// Attaches (or clears) the resume and refreshes every file-name display.
    pub fn choose_resume(&mut self, file: Option<ResumeFile>) {
        let label = self.draft.set_resume_file(file);
        if let Some(panel) = self.panel.as_generator_mut() {
            panel.set_file_label(&label);
        }
    }

    pub fn select_card(&mut self, index: usize) -> Result<(), ClientError> {
        let gallery = self
            .generator_mut()?
            .gallery_mut()
            .ok_or_else(|| ClientError::NotFound("This tab has no template gallery".to_string()))?;
        gallery.select(index)?;
        Ok(())
    }

    pub fn select_template(&mut self, name: &str) -> Result<(), ClientError> {
        let gallery = self
            .generator_mut()?
            .gallery_mut()
            .ok_or_else(|| ClientError::NotFound("This tab has no template gallery".to_string()))?;
        gallery.select_by_name(name)?;
        Ok(())
    }

    pub fn select_doc_type(&mut self, doc_type: DocType) -> Result<(), ClientError> {
        self.generator_mut()?.set_doc_type(doc_type)
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.generator_mut()?.set_text(name, value)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Submission
    // ────────────────────────────────────────────────────────────────────────

    /// Starts a submission for the visible tab.
    ///
    /// Leaves the pane loading and returns the request to send. Validation
    /// failures land in the pane's error state right away and `None` is
    /// returned; nothing is sent.
    pub fn begin_submission(&mut self) -> Option<PendingSubmission> {
        let draft = self.draft.snapshot();
        let api = self.api.clone();
        let sequences = self.draft.clone();

        let panel = self.panel.as_generator_mut()?;
        match assemble(panel, &draft) {
            Ok(request) => {
                panel.output_mut().begin();
                let sequence = sequences.next_sequence(request.tab);
                Some(PendingSubmission::new(api, request, sequence))
            }
            Err(err) => {
                warn!("Submission for {} rejected: {err}", panel.tab());
                panel.output_mut().reject(err.user_message());
                None
            }
        }
    }

    /// Routes a finished request into the draft and, if its tab is on screen,
    /// into the pane. Responses superseded by a newer submission are dropped.
    pub fn apply_outcome(&mut self, outcome: SubmissionOutcome) -> Result<(), ClientError> {
        let SubmissionOutcome {
            tab,
            sequence,
            result,
        } = outcome;

        if !self.draft.is_latest(tab, sequence) {
            warn!("Discarding stale response #{sequence} for {tab}");
            return Ok(());
        }

        let visible = self
            .panel
            .as_generator_mut()
            .filter(|panel| panel.tab() == tab);

        match result {
            Ok(content) if tab == TabId::Portfolio => {
                self.handoff.set(PORTFOLIO_KEY, content);
                if let Some(panel) = visible {
                    let pane = panel.output_mut();
                    if pane.settle_idle().is_err() {
                        *pane = OutputMachine::idle(tab);
                    }
                }
                self.open_preview(PORTFOLIO_PREVIEW_PATH)
            }
            Ok(content) => {
                self.draft.record_output_if_latest(tab, sequence, &content);
                // A pane that is not loading was re-rendered while the request
                // was in flight. It is rebuilt from the outcome.
                if let Some(panel) = visible {
                    let pane = panel.output_mut();
                    if pane.succeed(content.as_str()).is_err() {
                        *pane = OutputMachine::restored(tab, content);
                    }
                }
                Ok(())
            }
            Err(err) => {
                if let Some(panel) = visible {
                    let message = err.user_message();
                    let pane = panel.output_mut();
                    if pane.fail(message.as_str()).is_err() {
                        *pane = OutputMachine::failed(tab, message);
                    }
                }
                Err(err)
            }
        }
    }

    /// Validate, send and apply in one go for the visible tab.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let Some(pending) = self.begin_submission() else {
            return match self.generator()?.output().state() {
                OutputState::Error(message) => {
                    Err(ClientError::Validation(message.clone()))
                }
                _ => Ok(()),
            };
        };
        let outcome = pending.send().await;
        self.apply_outcome(outcome)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Result actions (success state only)
    // ────────────────────────────────────────────────────────────────────────

    fn result(&self) -> Result<(TabId, &str), ClientError> {
        let panel = self.generator()?;
        let text = panel
            .output()
            .result_text()
            .ok_or_else(|| ClientError::NotFound("There is no result to act on yet".to_string()))?;
        Ok((panel.tab(), text))
    }

    fn open_preview(&self, path: &str) -> Result<(), ClientError> {
        let url = self
            .preview_base
            .join(path)
            .map_err(|e| ClientError::Network(format!("invalid preview path '{path}': {e}")))?;
        self.browser.navigator.open(url.as_str())
    }

    /// Hands the result to the preview page and opens it. Portfolio pages
    /// never reach a success pane; they are handed off when they arrive.
    pub fn preview(&self) -> Result<(), ClientError> {
        let (_, text) = self.result()?;
        self.handoff.set(PREVIEW_KEY, text);
        self.open_preview(PREVIEW_PATH)
    }

    /// Writes the raw result to the clipboard and flips the copy button to
    /// its acknowledgement for a short window.
    pub async fn copy(&mut self) -> Result<(), ClientError> {
        let (_, text) = self.result()?;
        let text = text.to_string();
        self.browser.clipboard.write_text(&text).await?;
        self.generator_mut()?.output_mut().acknowledge_copy(Instant::now());
        Ok(())
    }

    pub fn copy_label(&self) -> &'static str {
        self.panel
            .as_generator()
            .map_or(COPY_LABEL, |panel| panel.output().copy_label(Instant::now()))
    }

    pub fn download(&self, format: ExportFormat) -> Result<ExportedFile, ClientError> {
        let (tab, text) = self.result()?;
        export(tab, text, format)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Job tracker
    // ────────────────────────────────────────────────────────────────────────

    pub fn tracker(&self) -> Option<&TrackerPanel> {
        match &self.panel {
            Panel::Tracker(panel) => Some(panel),
            Panel::Generator(_) => None,
        }
    }

    pub async fn tracker_reload(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.tracker_mut()?.reload(&api).await
    }

    pub fn tracker_open_create(&mut self, today: NaiveDate) -> Result<(), ClientError> {
        self.tracker_mut()?.open_create(today);
        Ok(())
    }

    pub async fn tracker_open_edit(&mut self, id: JobId) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.tracker_mut()?.open_edit(&api, id).await
    }

    pub fn tracker_form_mut(&mut self) -> Option<&mut JobApplicationDraft> {
        self.panel.as_tracker_mut()?.form_mut()
    }

    pub async fn tracker_save(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.tracker_mut()?.save(&api).await
    }

    pub async fn tracker_delete(&mut self, id: JobId) -> Result<bool, ClientError> {
        let api = self.api.clone();
        let confirm = Arc::clone(&self.browser.confirm);
        self.tracker_mut()?.delete(&api, id, confirm.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::testing::{MemoryClipboard, RecordingNavigator};
    use crate::browser::FixedAnswer;
    use crate::output::machine::COPIED_LABEL;
    use crate::submission::pipeline::{EMPTY_JOB_DESCRIPTION, MISSING_PORTFOLIO_RESUME};
    use crate::views::composer::Field;
    use crate::views::gallery::CatalogStatus;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        app: App,
        clipboard: Arc<MemoryClipboard>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness(server: &MockServer) -> Harness {
        let clipboard = Arc::new(MemoryClipboard::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let browser = Browser {
            clipboard: clipboard.clone(),
            navigator: navigator.clone(),
            confirm: Arc::new(FixedAnswer(true)),
        };
        let base = Url::parse(&server.uri()).unwrap();
        let app = App::new(ApiClient::new(base.clone()).unwrap(), base, browser);
        Harness {
            app,
            clipboard,
            navigator,
        }
    }

    fn resume() -> ResumeFile {
        ResumeFile::new("ada.pdf", b"%PDF-1.4 ada".to_vec())
    }

    async fn mount_content(server: &MockServer, endpoint: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": content })))
            .mount(server)
            .await;
    }

    async fn mount_templates(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/get-templates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "Entry Level", "description": "Students", "content": "# Entry"},
                {"name": "Senior", "description": "Veterans", "content": "# Senior"}
            ])))
            .mount(server)
            .await;
    }

    fn state(app: &App) -> OutputState {
        app.panel()
            .as_generator()
            .unwrap()
            .output()
            .state()
            .clone()
    }

    #[tokio::test]
    async fn test_blank_job_description_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "x"})))
            .expect(0)
            .mount(&server)
            .await;

        let mut h = harness(&server);
        for tab in [TabId::Score, TabId::CoverLetter, TabId::InterviewPrep, TabId::Linkedin, TabId::SkillGap] {
            h.app.render_tab(tab);
            h.app.type_job_description("   ");
            h.app.choose_resume(Some(resume()));
            let err = h.app.submit().await.unwrap_err();
            assert_eq!(err, ClientError::validation(EMPTY_JOB_DESCRIPTION));
            assert_eq!(state(&h.app), OutputState::Error(EMPTY_JOB_DESCRIPTION.into()));
            assert!(h.app.panel().as_generator().unwrap().submit_enabled());
        }
    }

    #[tokio::test]
    async fn test_switching_tabs_preserves_input_and_output() {
        let server = MockServer::start().await;
        mount_content(&server, "/api/score", "### Overall Score: 91/100").await;

        let mut h = harness(&server);
        h.app.switch_tab(TabId::Score).await.unwrap();
        h.app.type_job_description("Platform engineer");
        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();

        h.app.switch_tab(TabId::CoverLetter).await.unwrap();
        let cover = h.app.panel().as_generator().unwrap();
        assert_eq!(cover.output().state(), &OutputState::Idle);
        assert_eq!(
            cover.fields()[0],
            Field::JobDescription {
                text: "Platform engineer".into()
            }
        );

        h.app.switch_tab(TabId::Score).await.unwrap();
        let score = h.app.panel().as_generator().unwrap();
        assert_eq!(
            score.output().state(),
            &OutputState::Success("### Overall Score: 91/100".into())
        );
        assert!(score.fields().contains(&Field::ResumeUpload {
            input_id: "resume-upload",
            file_label: "ada.pdf".into()
        }));
    }

    #[tokio::test]
    async fn test_background_response_updates_only_its_own_tab() {
        let server = MockServer::start().await;
        mount_content(&server, "/api/linkedin", "About: Rustacean").await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::Linkedin);
        h.app.type_job_description("Staff engineer");
        h.app.choose_resume(Some(resume()));
        let pending = h.app.begin_submission().unwrap();

        h.app.render_tab(TabId::InterviewPrep);
        let outcome = pending.send().await;
        h.app.apply_outcome(outcome).unwrap();

        assert_eq!(state(&h.app), OutputState::Idle);
        assert!(h.app.draft().output(TabId::InterviewPrep).is_none());
        assert_eq!(
            h.app.draft().output(TabId::Linkedin).as_deref(),
            Some("About: Rustacean")
        );

        h.app.render_tab(TabId::Linkedin);
        assert_eq!(state(&h.app), OutputState::Success("About: Rustacean".into()));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/score"))
            .and(body_string_contains("first JD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "old"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/score"))
            .and(body_string_contains("second JD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "new"})))
            .mount(&server)
            .await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::Score);
        h.app.choose_resume(Some(resume()));
        h.app.type_job_description("first JD");
        let first = h.app.begin_submission().unwrap();
        h.app.type_job_description("second JD");
        let second = h.app.begin_submission().unwrap();

        let newer = second.send().await;
        h.app.apply_outcome(newer).unwrap();
        let older = first.send().await;
        h.app.apply_outcome(older).unwrap();

        assert_eq!(h.app.draft().output(TabId::Score).as_deref(), Some("new"));
        assert_eq!(state(&h.app), OutputState::Success("new".into()));
    }

    #[tokio::test]
    async fn test_remote_error_is_shown_and_not_stored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/cover-letter"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Gemini quota exhausted"})))
            .mount(&server)
            .await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::CoverLetter);
        h.app.type_job_description("JD");
        h.app.choose_resume(Some(resume()));
        let err = h.app.submit().await.unwrap_err();

        assert_eq!(err, ClientError::Remote("Gemini quota exhausted".into()));
        assert_eq!(state(&h.app), OutputState::Error("Gemini quota exhausted".into()));
        assert!(h.app.draft().output(TabId::CoverLetter).is_none());
        assert!(h.app.download(ExportFormat::Markdown).is_err());
    }

    #[tokio::test]
    async fn test_portfolio_requires_resume_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-portfolio"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "<html></html>"})))
            .expect(0)
            .mount(&server)
            .await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::Portfolio);
        let err = h.app.submit().await.unwrap_err();
        assert_eq!(err, ClientError::validation(MISSING_PORTFOLIO_RESUME));
        assert!(h.navigator.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_portfolio_success_opens_preview_and_leaves_panel_alone() {
        let server = MockServer::start().await;
        let page = "<!DOCTYPE html><html><body><h1>Ada</h1></body></html>";
        mount_content(&server, "/api/generate-portfolio", page).await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::Portfolio);
        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();

        assert_eq!(h.app.handoff().get(PORTFOLIO_KEY).as_deref(), Some(page));
        let opened = h.navigator.opened.lock().unwrap().clone();
        assert_eq!(opened, vec![format!("{}/portfolio-preview", server.uri())]);
        assert_eq!(state(&h.app), OutputState::Idle);
        assert!(h.app.draft().output(TabId::Portfolio).is_none());
        assert!(h.app.preview().is_err());
        assert!(h.app.handoff().get(PREVIEW_KEY).is_none());
    }

    #[tokio::test]
    async fn test_failure_after_revisit_is_shown_on_rebuilt_pane() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/score"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Gemini quota exhausted"})))
            .mount(&server)
            .await;

        let mut h = harness(&server);
        h.app.draft().record_output(TabId::Score, "### Overall Score: 60/100");
        h.app.render_tab(TabId::Score);
        h.app.type_job_description("JD");
        h.app.choose_resume(Some(resume()));
        let pending = h.app.begin_submission().unwrap();

        h.app.render_tab(TabId::Score);
        assert_eq!(state(&h.app), OutputState::Success("### Overall Score: 60/100".into()));

        let outcome = pending.send().await;
        let err = h.app.apply_outcome(outcome).unwrap_err();

        assert_eq!(err, ClientError::Remote("Gemini quota exhausted".into()));
        assert_eq!(state(&h.app), OutputState::Error("Gemini quota exhausted".into()));
        assert_eq!(
            h.app.draft().output(TabId::Score).as_deref(),
            Some("### Overall Score: 60/100")
        );
    }

    #[tokio::test]
    async fn test_success_after_revisit_is_shown_on_rebuilt_pane() {
        let server = MockServer::start().await;
        mount_content(&server, "/api/score", "### Overall Score: 88/100").await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::Score);
        h.app.type_job_description("JD");
        h.app.choose_resume(Some(resume()));
        let pending = h.app.begin_submission().unwrap();

        h.app.render_tab(TabId::CoverLetter);
        h.app.render_tab(TabId::Score);
        assert_eq!(state(&h.app), OutputState::Idle);

        let outcome = pending.send().await;
        h.app.apply_outcome(outcome).unwrap();

        assert_eq!(state(&h.app), OutputState::Success("### Overall Score: 88/100".into()));
        assert_eq!(
            h.app.draft().output(TabId::Score).as_deref(),
            Some("### Overall Score: 88/100")
        );
    }

    #[tokio::test]
    async fn test_validation_failure_replaces_previous_result() {
        let server = MockServer::start().await;
        let mut h = harness(&server);
        h.app.draft().record_output(TabId::CoverLetter, "Dear team");
        h.app.render_tab(TabId::CoverLetter);

        assert!(h.app.begin_submission().is_none());
        assert_eq!(state(&h.app), OutputState::Error(EMPTY_JOB_DESCRIPTION.into()));
        assert_eq!(h.app.draft().output(TabId::CoverLetter).as_deref(), Some("Dear team"));
    }

    #[tokio::test]
    async fn test_generate_uses_catalog_default_and_selection() {
        let server = MockServer::start().await;
        mount_templates(&server).await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_string_contains("Senior"))
            .and(body_string_contains("CV"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "# Ada Lovelace"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut h = harness(&server);
        h.app.switch_tab(TabId::Generate).await.unwrap();
        let gallery = h.app.panel().as_generator().unwrap().gallery().unwrap();
        assert_eq!(gallery.hidden_value(), "Entry Level");

        h.app.select_card(1).unwrap();
        h.app.select_doc_type(DocType::Cv).unwrap();
        h.app.type_job_description("Analyst");
        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();
        assert_eq!(state(&h.app), OutputState::Success("# Ada Lovelace".into()));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_inline_and_does_not_block() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/get-templates"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_content(&server, "/api/fill-template", "# Filled").await;

        let mut h = harness(&server);
        h.app.switch_tab(TabId::Templates).await.unwrap();
        let gallery = h.app.panel().as_generator().unwrap().gallery().unwrap();
        assert_eq!(gallery.status(), &CatalogStatus::Failed(CATALOG_ERROR.into()));

        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();
        assert_eq!(state(&h.app), OutputState::Success("# Filled".into()));
    }

    #[tokio::test]
    async fn test_preview_hands_off_markdown() {
        let server = MockServer::start().await;
        mount_content(&server, "/api/interview-prep", "### Technical Questions").await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::InterviewPrep);
        assert!(h.app.preview().is_err());

        h.app.type_job_description("JD");
        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();
        h.app.preview().unwrap();

        assert_eq!(
            h.app.handoff().get(PREVIEW_KEY).as_deref(),
            Some("### Technical Questions")
        );
        let opened = h.navigator.opened.lock().unwrap().clone();
        assert_eq!(opened, vec![format!("{}/preview", server.uri())]);
    }

    #[tokio::test]
    async fn test_copy_writes_exact_text_and_label_reverts() {
        let server = MockServer::start().await;
        let result = "Dear Hiring Manager,\n\nI am **excited**...";
        mount_content(&server, "/api/cover-letter", result).await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::CoverLetter);
        h.app.type_job_description("JD");
        h.app.choose_resume(Some(resume()));
        h.app.submit().await.unwrap();

        tokio::time::pause();
        h.app.copy().await.unwrap();
        assert_eq!(h.clipboard.contents.lock().unwrap().as_deref(), Some(result));
        assert_eq!(h.app.copy_label(), COPIED_LABEL);

        tokio::time::advance(Duration::from_millis(2001)).await;
        assert_eq!(h.app.copy_label(), COPY_LABEL);
    }

    #[tokio::test]
    async fn test_download_after_success() {
        let server = MockServer::start().await;
        mount_content(&server, "/api/skill-gap", "## Missing: Kubernetes").await;

        let mut h = harness(&server);
        h.app.render_tab(TabId::SkillGap);
        h.app.type_job_description("Platform engineer");
        h.app.choose_resume(Some(resume()));
        h.app.set_field("targetRole", "SRE").unwrap();
        h.app.submit().await.unwrap();

        let file = h.app.download(ExportFormat::Markdown).unwrap();
        assert_eq!(file.file_name, "skill-gap-result.md");
        assert_eq!(file.bytes, b"## Missing: Kubernetes");
    }

    #[tokio::test]
    async fn test_resume_label_follows_file_across_tabs() {
        let server = MockServer::start().await;
        let mut h = harness(&server);
        h.app.render_tab(TabId::Portfolio);
        h.app.choose_resume(Some(resume()));
        h.app.render_tab(TabId::Templates);
        let fields = h.app.panel().as_generator().unwrap().fields().to_vec();
        assert!(fields.contains(&Field::ResumeUpload {
            input_id: "resume-upload",
            file_label: "ada.pdf".into()
        }));
    }

    #[tokio::test]
    async fn test_tracker_round_trip_through_app() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "company": "Acme", "role": "Engineer", "dateApplied": "2024-02-02", "status": "Applied"}
            ])))
            .mount(&server)
            .await;

        let mut h = harness(&server);
        assert!(h.app.tracker_reload().await.is_err());
        h.app.switch_tab(TabId::Tracker).await.unwrap();
        let tracker = h.app.tracker().unwrap();
        assert_eq!(tracker.jobs().len(), 1);
        assert_eq!(tracker.jobs()[0].company, "Acme");
        assert!(h.app.submit().await.is_err());
    }
}
