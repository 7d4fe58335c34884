use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

/// Identifier assigned by the tracker backend.
pub type JobId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::validation(format!("Unknown application status '{s}'")))
    }
}

/// A job application as stored by the tracker backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: JobId,
    pub company: String,
    pub role: String,
    pub date_applied: NaiveDate,
    pub status: ApplicationStatus,
}

/// The editable part of a record: body of `POST /api/jobs` and `PUT /api/jobs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationDraft {
    pub company: String,
    pub role: String,
    pub date_applied: NaiveDate,
    pub status: ApplicationStatus,
}

impl JobApplicationDraft {
    pub fn new(company: impl Into<String>, role: impl Into<String>, date_applied: NaiveDate) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            date_applied,
            status: ApplicationStatus::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.company.trim().is_empty() || self.role.trim().is_empty() {
            return Err(ClientError::validation("Company and role are required."));
        }
        Ok(())
    }
}

impl From<&JobApplication> for JobApplicationDraft {
    fn from(job: &JobApplication) -> Self {
        Self {
            company: job.company.clone(),
            role: job.role.clone(),
            date_applied: job.date_applied,
            status: job.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_camel_case_wire_format() {
        let job: JobApplication = serde_json::from_str(
            r#"{"id": 7, "company": "Acme", "role": "Engineer", "dateApplied": "2024-03-01", "status": "Interviewing"}"#,
        )
        .unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.status, ApplicationStatus::Interviewing);
        assert_eq!(job.date_applied, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let body = serde_json::to_value(JobApplicationDraft::from(&job)).unwrap();
        assert_eq!(body["dateApplied"], "2024-03-01");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("offer".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::Offer);
        assert!("ghosted".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_blank_company_fails_validation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let draft = JobApplicationDraft::new("  ", "Engineer", date);
        assert_eq!(
            draft.validate(),
            Err(ClientError::validation("Company and role are required."))
        );
        assert!(JobApplicationDraft::new("Acme", "Engineer", date).validate().is_ok());
    }
}
