//! Browser-side collaborators the core talks to: clipboard, new browsing
//! contexts, confirmation prompts, and the short-lived hand-off slots a
//! preview page reads its content from.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use crate::errors::ClientError;

/// Hand-off key read by the `/preview` page.
pub const PREVIEW_KEY: &str = "resumePreviewContent";
/// Hand-off key read by the `/portfolio-preview` page.
pub const PORTFOLIO_KEY: &str = "portfolioHtmlContent";

pub const PREVIEW_PATH: &str = "/preview";
pub const PORTFOLIO_PREVIEW_PATH: &str = "/portfolio-preview";

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this application?";

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClientError>;
}

/// Opens a URL in a new browsing context.
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ClientError>;
}

/// Interactive yes/no prompt.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Session-scoped key/value slots shared with preview contexts.
#[derive(Debug, Clone, Default)]
pub struct HandoffStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl HandoffStore {
    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

/// Terminal stand-in for the system clipboard: prints the text.
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClientError> {
        println!("{text}");
        Ok(())
    }
}

/// Terminal stand-in for `window.open`: logs where the preview lives.
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        info!("Preview available at {url}");
        Ok(())
    }
}

/// Answers every prompt the same way (`--yes` on the command line).
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handoff_slots_are_shared_between_clones() {
        let store = HandoffStore::default();
        let reader = store.clone();
        store.set(PREVIEW_KEY, "# Resume");
        assert_eq!(reader.get(PREVIEW_KEY).as_deref(), Some("# Resume"));
        assert!(reader.get(PORTFOLIO_KEY).is_none());

        store.set(PREVIEW_KEY, "# Resume v2");
        assert_eq!(reader.get(PREVIEW_KEY).as_deref(), Some("# Resume v2"));
    }

    #[test]
    fn test_fixed_answer() {
        assert!(FixedAnswer(true).confirm(DELETE_PROMPT));
        assert!(!FixedAnswer(false).confirm(DELETE_PROMPT));
    }
}
