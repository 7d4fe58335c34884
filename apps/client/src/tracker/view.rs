//! Job tracker list view.
//!
//! No local cache: every mutation is followed by a full list reload, and the
//! edit modal is pre-filled from a freshly fetched list rather than the rows
//! already on screen.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::browser::{Confirm, DELETE_PROMPT};
use crate::errors::ClientError;
use crate::models::job::{JobApplication, JobApplicationDraft, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Creating(JobApplicationDraft),
    Editing { id: JobId, form: JobApplicationDraft },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerPanel {
    jobs: Vec<JobApplication>,
    status: ListStatus,
    modal: Modal,
}

impl Default for TrackerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerPanel {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            status: ListStatus::Loading,
            modal: Modal::Closed,
        }
    }

    pub fn jobs(&self) -> &[JobApplication] {
        &self.jobs
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Replaces the whole list with the backend's current state.
    pub async fn reload(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.status = ListStatus::Loading;
        match api.list_jobs().await {
            Ok(jobs) => {
                info!("Loaded {} job applications", jobs.len());
                self.jobs = jobs;
                self.status = ListStatus::Ready;
                Ok(())
            }
            Err(err) => {
                self.jobs.clear();
                self.status = ListStatus::Failed(err.user_message());
                Err(err)
            }
        }
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        self.modal = Modal::Creating(JobApplicationDraft::new("", "", today));
    }

    /// Re-fetches the list and opens the edit modal for `id`.
    ///
    /// If the record is gone the modal stays closed and the refreshed list
    /// (without it) is shown.
    pub async fn open_edit(&mut self, api: &ApiClient, id: JobId) -> Result<(), ClientError> {
        self.modal = Modal::Closed;
        self.reload(api).await?;

        let job = self
            .jobs
            .iter()
            .find(|job| job.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Job application {id} no longer exists")))?;

        self.modal = Modal::Editing {
            id,
            form: JobApplicationDraft::from(job),
        };
        Ok(())
    }

    pub fn form_mut(&mut self) -> Option<&mut JobApplicationDraft> {
        match &mut self.modal {
            Modal::Creating(form) | Modal::Editing { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Submits the open modal (create or update), closes it and reloads.
    /// On failure the modal stays open with the user's input.
    pub async fn save(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        match &self.modal {
            Modal::Closed => {
                return Err(ClientError::validation("No application form is open."));
            }
            Modal::Creating(form) => {
                form.validate()?;
                let created = api.create_job(form).await?;
                info!("Created job application {} at {}", created.id, created.company);
            }
            Modal::Editing { id, form } => {
                form.validate()?;
                api.update_job(*id, form).await?;
                info!("Updated job application {id}");
            }
        }
        self.modal = Modal::Closed;
        self.reload(api).await
    }

    /// Deletes after interactive confirmation. Returns `false` when the user
    /// declined, in which case no request is sent.
    pub async fn delete(
        &mut self,
        api: &ApiClient,
        id: JobId,
        confirm: &dyn Confirm,
    ) -> Result<bool, ClientError> {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(false);
        }
        if let Err(err) = api.delete_job(id).await {
            warn!("Deleting job application {id} failed: {err}");
            self.reload(api).await?;
            return Err(err);
        }
        info!("Deleted job application {id}");
        if matches!(self.modal, Modal::Editing { id: open, .. } if open == id) {
            self.modal = Modal::Closed;
        }
        self.reload(api).await?;
        Ok(true)
    }
}
