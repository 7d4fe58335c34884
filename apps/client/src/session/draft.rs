//! Page-lifetime draft store.
//!
//! Holds the job description, the uploaded resume and the last successful
//! output of every tab. Created once per session and never persisted: a new
//! session starts empty.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;

use crate::views::tabs::TabId;

/// Label shown by every upload field while no file is attached.
pub const NO_FILE_LABEL: &str = "Click to upload or drag and drop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Snapshot of the user's in-progress input.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    job_description: String,
    resume: Option<ResumeFile>,
    outputs: HashMap<TabId, String>,
    /// Latest submission sequence issued per tab.
    issued: HashMap<TabId, u64>,
}

impl SessionDraft {
    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    /// What the upload fields display for the current file.
    pub fn resume_file_label(&self) -> &str {
        self.resume
            .as_ref()
            .map(|file| file.file_name.as_str())
            .unwrap_or(NO_FILE_LABEL)
    }

    pub fn output(&self, tab: TabId) -> Option<&str> {
        self.outputs.get(&tab).map(String::as_str)
    }
}

/// Shared handle to the session draft.
///
/// Cloning the handle shares the store. Mutations are synchronous and
/// visible to every holder immediately. No validation happens here.
#[derive(Debug, Clone, Default)]
pub struct SharedDraft {
    inner: Arc<RwLock<SessionDraft>>,
}

impl SharedDraft {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionDraft> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionDraft> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_job_description(&self, text: impl Into<String>) {
        self.write().job_description = text.into();
    }

    /// Replaces (or clears) the uploaded resume and returns the new file label.
    pub fn set_resume_file(&self, file: Option<ResumeFile>) -> String {
        let mut draft = self.write();
        draft.resume = file;
        draft.resume_file_label().to_string()
    }

    /// Point-in-time copy of the draft. The resume bytes are shared, not copied.
    pub fn snapshot(&self) -> SessionDraft {
        self.read().clone()
    }

    pub fn record_output(&self, tab: TabId, text: impl Into<String>) {
        self.write().outputs.insert(tab, text.into());
    }

    pub fn output(&self, tab: TabId) -> Option<String> {
        self.read().output(tab).map(str::to_string)
    }

    /// Issues the next submission sequence number for `tab`.
    pub fn next_sequence(&self, tab: TabId) -> u64 {
        let mut draft = self.write();
        let seq = draft.issued.entry(tab).or_insert(0);
        *seq += 1;
        *seq
    }

    pub fn is_latest(&self, tab: TabId, sequence: u64) -> bool {
        self.read().issued.get(&tab).copied().unwrap_or(0) == sequence
    }

    /// Records `text` only if `sequence` is still the latest issued for `tab`.
    /// Returns whether the output was stored.
    pub fn record_output_if_latest(&self, tab: TabId, sequence: u64, text: &str) -> bool {
        let mut draft = self.write();
        if draft.issued.get(&tab).copied().unwrap_or(0) != sequence {
            return false;
        }
        draft.outputs.insert(tab, text.to_string());
        true
    }
}
