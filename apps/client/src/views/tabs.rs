//! Static tab table: which inputs each tab needs, where it submits, and how
//! its result is displayed. Not mutated at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabId {
    Generate,
    Score,
    CoverLetter,
    InterviewPrep,
    Linkedin,
    Templates,
    Portfolio,
    Tracker,
    SkillGap,
    StarCoach,
}

/// How a successful result is turned into display markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Markdown,
    Html,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequiredInputs {
    pub job_description: bool,
    pub resume: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    pub id: TabId,
    pub label: &'static str,
    /// Text on the submit control.
    pub action_label: &'static str,
    pub required: RequiredInputs,
    /// `None` for tabs that do not run the submission pipeline.
    pub endpoint: Option<&'static str>,
    pub result_kind: ResultKind,
}

const BOTH: RequiredInputs = RequiredInputs {
    job_description: true,
    resume: true,
};
const RESUME_ONLY: RequiredInputs = RequiredInputs {
    job_description: false,
    resume: true,
};
const NOTHING: RequiredInputs = RequiredInputs {
    job_description: false,
    resume: false,
};

// Indexed by `TabId as usize`.
static DESCRIPTORS: [TabDescriptor; 10] = [
    TabDescriptor {
        id: TabId::Generate,
        label: "Generate",
        action_label: "Generate Document",
        required: BOTH,
        endpoint: Some("/api/generate"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::Score,
        label: "Score",
        action_label: "Score My Resume",
        required: BOTH,
        endpoint: Some("/api/score"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::CoverLetter,
        label: "Cover Letter",
        action_label: "Write Cover Letter",
        required: BOTH,
        endpoint: Some("/api/cover-letter"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::InterviewPrep,
        label: "Interview Prep",
        action_label: "Get Interview Questions",
        required: BOTH,
        endpoint: Some("/api/interview-prep"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::Linkedin,
        label: "LinkedIn",
        action_label: "Optimize LinkedIn Profile",
        required: BOTH,
        endpoint: Some("/api/linkedin"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::Templates,
        label: "ATS Templates",
        action_label: "Fill Selected Template",
        required: RESUME_ONLY,
        endpoint: Some("/api/fill-template"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::Portfolio,
        label: "Portfolio",
        action_label: "Generate My Portfolio",
        required: RESUME_ONLY,
        endpoint: Some("/api/generate-portfolio"),
        result_kind: ResultKind::Html,
    },
    TabDescriptor {
        id: TabId::Tracker,
        label: "Job Tracker",
        action_label: "Add Application",
        required: NOTHING,
        endpoint: None,
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::SkillGap,
        label: "Skill Gap",
        action_label: "Analyze Skill Gap",
        required: BOTH,
        endpoint: Some("/api/skill-gap"),
        result_kind: ResultKind::Markdown,
    },
    TabDescriptor {
        id: TabId::StarCoach,
        label: "STAR Coach",
        action_label: "Coach My Answer",
        required: NOTHING,
        endpoint: Some("/api/star-coach"),
        result_kind: ResultKind::Markdown,
    },
];

impl TabId {
    pub const ALL: [TabId; 10] = [
        TabId::Generate,
        TabId::Score,
        TabId::CoverLetter,
        TabId::InterviewPrep,
        TabId::Linkedin,
        TabId::Templates,
        TabId::Portfolio,
        TabId::Tracker,
        TabId::SkillGap,
        TabId::StarCoach,
    ];

    pub fn descriptor(self) -> &'static TabDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Generate => "generate",
            TabId::Score => "score",
            TabId::CoverLetter => "cover-letter",
            TabId::InterviewPrep => "interview-prep",
            TabId::Linkedin => "linkedin",
            TabId::Templates => "templates",
            TabId::Portfolio => "portfolio",
            TabId::Tracker => "tracker",
            TabId::SkillGap => "skill-gap",
            TabId::StarCoach => "star-coach",
        }
    }

    /// Tabs driven by the submission pipeline (everything except the tracker).
    pub fn is_generator(self) -> bool {
        self.descriptor().endpoint.is_some()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| ClientError::NotFound(format!("Unknown tab '{s}'")))
    }
}
