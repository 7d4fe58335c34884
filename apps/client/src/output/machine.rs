//! Result pane state machine: idle → loading → success | error.
//!
//! A fresh submission may start from any state. `success` and `error` are
//! reachable only from `loading`. Restoring a tab with a stored output
//! constructs the pane directly in `success`.

use thiserror::Error;
use tokio::time::{Duration, Instant};

use crate::output::export::ExportFormat;
use crate::output::render::render_result;
use crate::views::tabs::{ResultKind, TabId};

/// How long the copy button shows its acknowledgement.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

const IDLE_HEADLINE: &str = "Your result will appear here.";
const IDLE_HINT: &str = "Fill in the details and click generate.";
const LOADING_HEADLINE: &str = "AI is working its magic...";
const LOADING_HINT: &str = "This can take up to 30 seconds.";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("output pane cannot move from {from} to {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl OutputState {
    pub fn name(&self) -> &'static str {
        match self {
            OutputState::Idle => "idle",
            OutputState::Loading => "loading",
            OutputState::Success(_) => "success",
            OutputState::Error(_) => "error",
        }
    }
}

/// Secondary actions offered by the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Preview,
    Copy,
    Download(ExportFormat),
}

/// Display description of the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView {
    Idle {
        headline: &'static str,
        hint: &'static str,
    },
    Loading {
        headline: &'static str,
        hint: &'static str,
    },
    Success {
        title: String,
        html: String,
        actions: Vec<Action>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMachine {
    tab: TabId,
    kind: ResultKind,
    state: OutputState,
    copied_at: Option<Instant>,
}

impl OutputMachine {
    pub fn idle(tab: TabId) -> Self {
        Self {
            tab,
            kind: tab.descriptor().result_kind,
            state: OutputState::Idle,
            copied_at: None,
        }
    }

    /// Pane for a revisited tab that already has a stored result.
    pub fn restored(tab: TabId, text: impl Into<String>) -> Self {
        Self {
            state: OutputState::Success(text.into()),
            ..Self::idle(tab)
        }
    }

    /// Pane for a visible tab whose in-flight request failed after the tab
    /// was re-rendered. Errors are never stored, so this is built directly.
    pub fn failed(tab: TabId, message: impl Into<String>) -> Self {
        Self {
            state: OutputState::Error(message.into()),
            ..Self::idle(tab)
        }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn state(&self) -> &OutputState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == OutputState::Loading
    }

    /// The submit control is disabled while a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Start of a submission. Always legal.
    pub fn begin(&mut self) {
        self.state = OutputState::Loading;
        self.copied_at = None;
    }

    /// Start of a submission that validation refused: the pane passes
    /// through loading and lands in `error` without a request.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.begin();
        self.state = OutputState::Error(message.into());
    }

    pub fn succeed(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_loading("success")?;
        self.state = OutputState::Success(text.into());
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.expect_loading("error")?;
        self.state = OutputState::Error(message.into());
        Ok(())
    }

    /// Back to idle after a submission whose result is shown elsewhere
    /// (portfolio preview).
    pub fn settle_idle(&mut self) -> Result<(), TransitionError> {
        self.expect_loading("idle")?;
        self.state = OutputState::Idle;
        Ok(())
    }

    fn expect_loading(&self, to: &'static str) -> Result<(), TransitionError> {
        if self.is_loading() {
            Ok(())
        } else {
            Err(TransitionError {
                from: self.state.name(),
                to,
            })
        }
    }

    /// Raw result text, available only in `success`.
    pub fn result_text(&self) -> Option<&str> {
        match &self.state {
            OutputState::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        if self.result_text().is_none() {
            return Vec::new();
        }
        let mut actions = vec![Action::Preview, Action::Copy];
        actions.extend(ExportFormat::ALL.into_iter().map(Action::Download));
        actions
    }

    pub fn view(&self) -> OutputView {
        match &self.state {
            OutputState::Idle => OutputView::Idle {
                headline: IDLE_HEADLINE,
                hint: IDLE_HINT,
            },
            OutputState::Loading => OutputView::Loading {
                headline: LOADING_HEADLINE,
                hint: LOADING_HINT,
            },
            OutputState::Success(text) => OutputView::Success {
                title: format!("{} Result", self.tab.descriptor().label),
                html: render_result(self.kind, text),
                actions: self.actions(),
            },
            OutputState::Error(message) => OutputView::Error {
                message: message.clone(),
            },
        }
    }

    /// Marks a completed clipboard write. Purely cosmetic.
    pub fn acknowledge_copy(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn copy_label(&self, now: Instant) -> &'static str {
        match self.copied_at {
            Some(at) if now.duration_since(at) < COPY_ACK_WINDOW => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut pane = OutputMachine::idle(TabId::Score);
        assert!(pane.submit_enabled());
        pane.begin();
        assert!(!pane.submit_enabled());
        pane.succeed("### Overall Score: 72/100").unwrap();
        assert_eq!(pane.result_text(), Some("### Overall Score: 72/100"));
        assert!(pane.submit_enabled());
    }

    #[test]
    fn test_success_requires_loading() {
        let mut pane = OutputMachine::idle(TabId::Score);
        assert_eq!(
            pane.succeed("x"),
            Err(TransitionError {
                from: "idle",
                to: "success"
            })
        );

        pane.begin();
        pane.fail("boom").unwrap();
        assert!(pane.fail("again").is_err());
        assert!(pane.result_text().is_none());
    }

    #[test]
    fn test_resubmission_is_legal_from_every_state() {
        let mut pane = OutputMachine::restored(TabId::Linkedin, "old");
        pane.begin();
        assert!(pane.is_loading());
        pane.fail("nope").unwrap();
        pane.begin();
        assert!(pane.is_loading());
    }

    #[test]
    fn test_reject_lands_in_error_from_any_state() {
        for mut pane in [
            OutputMachine::idle(TabId::Score),
            OutputMachine::restored(TabId::Score, "old result"),
            OutputMachine::failed(TabId::Score, "old error"),
        ] {
            pane.reject("Job Description cannot be empty.");
            assert_eq!(
                pane.state(),
                &OutputState::Error("Job Description cannot be empty.".into())
            );
            assert!(pane.submit_enabled());
            assert!(pane.result_text().is_none());
        }
    }

    #[test]
    fn test_failed_pane_shows_error_view() {
        let pane = OutputMachine::failed(TabId::Linkedin, "quota exhausted");
        assert_eq!(
            pane.view(),
            OutputView::Error {
                message: "quota exhausted".into()
            }
        );
        assert!(pane.actions().is_empty());
    }

    #[test]
    fn test_actions_only_in_success() {
        let mut pane = OutputMachine::idle(TabId::CoverLetter);
        assert!(pane.actions().is_empty());
        pane.begin();
        assert!(pane.actions().is_empty());
        pane.succeed("Dear hiring manager").unwrap();
        let actions = pane.actions();
        assert!(actions.contains(&Action::Preview));
        assert!(actions.contains(&Action::Copy));
        assert!(actions.contains(&Action::Download(ExportFormat::Pdf)));
    }

    #[test]
    fn test_views() {
        let mut pane = OutputMachine::idle(TabId::InterviewPrep);
        assert!(matches!(pane.view(), OutputView::Idle { headline, .. } if headline == IDLE_HEADLINE));
        pane.begin();
        assert!(matches!(pane.view(), OutputView::Loading { hint, .. } if hint.contains("30 seconds")));
        pane.succeed("### Behavioral Questions").unwrap();
        match pane.view() {
            OutputView::Success { title, html, .. } => {
                assert_eq!(title, "Interview Prep Result");
                assert!(html.contains("<h3>Behavioral Questions</h3>"));
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_copy_label_reverts_after_window() {
        let mut pane = OutputMachine::restored(TabId::Score, "text");
        let start = Instant::now();
        assert_eq!(pane.copy_label(start), COPY_LABEL);
        pane.acknowledge_copy(start);
        assert_eq!(pane.copy_label(start + Duration::from_millis(1999)), COPIED_LABEL);
        assert_eq!(pane.copy_label(start + COPY_ACK_WINDOW), COPY_LABEL);
    }
}
