//! Wizard state and step payloads
//!
//! `WizardState` is the whole of a visitor's progress. It is serialized to the
//! session store between requests, so every field here is part of the stored
//! JSON shape.

use serde::{Deserialize, Serialize};

/// The three wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Photos,
    Contacts,
}

impl WizardStep {
    /// 1-based step number as used in the form's `step` field
    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Photos => 2,
            WizardStep::Contacts => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::BasicInfo),
            2 => Some(WizardStep::Photos),
            3 => Some(WizardStep::Contacts),
            _ => None,
        }
    }

    /// One step back, stopping at the first
    pub fn previous(self) -> Self {
        match self {
            WizardStep::BasicInfo | WizardStep::Photos => WizardStep::BasicInfo,
            WizardStep::Contacts => WizardStep::Photos,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic information",
            WizardStep::Photos => "Photos",
            WizardStep::Contacts => "Contacts",
        }
    }
}

/// Step 1 fields, kept exactly as submitted
///
/// Age stays a string until commit so a bad value can be shown back to the
/// visitor unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub last_seen_location: String,
    pub description: String,
    pub county: String,
    pub sub_county: String,
    pub ward: String,
}

impl BasicInfo {
    /// Required fields that are blank, by form field name
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("gender", &self.gender),
            ("last_seen_location", &self.last_seen_location),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A photo accepted at step 2 and waiting in the staging area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedPhoto {
    /// File name inside the staging directory (`temp_<uuid><ext>`)
    pub staged_name: String,
    pub original_name: String,
    pub content_type: String,
    pub size: u64,
    pub description: String,
    pub alt_text: String,
}

/// Everything collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReport {
    pub basic: Option<BasicInfo>,
    #[serde(default)]
    pub photos: Vec<StagedPhoto>,
}

impl DraftReport {
    pub fn is_empty(&self) -> bool {
        self.basic.is_none() && self.photos.is_empty()
    }

    pub fn staged_names(&self) -> Vec<String> {
        self.photos.iter().map(|p| p.staged_name.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: DraftReport,
}

/// One uploaded file from step 2, before validation
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    /// Declared content type from the multipart part
    pub content_type: String,
    pub data: Vec<u8>,
    pub description: String,
    pub alt_text: String,
}

/// One contact row from step 3
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRow {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl ContactRow {
    /// Rows need both a name and a phone number to count
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone_number.trim().is_empty()
    }
}

/// What the visitor asked for
#[derive(Debug, Clone)]
pub enum WizardAction {
    /// `action=previous_step`
    PreviousStep,
    SubmitBasicInfo(BasicInfo),
    SubmitPhotos(Vec<PhotoUpload>),
    SubmitContacts(Vec<ContactRow>),
    /// Missing or out-of-range step number: show the current step again
    Redisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

/// Inline message shown above the wizard form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Summary of a committed report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedReport {
    pub person_id: i64,
    pub slug: String,
    pub name: String,
}

/// Result of handling one wizard request
#[derive(Debug, Clone)]
pub struct WizardOutcome {
    pub state: WizardState,
    pub notices: Vec<Notice>,
    pub committed: Option<CommittedReport>,
}

impl WizardOutcome {
    pub fn new(state: WizardState) -> Self {
        Self { state, notices: Vec::new(), committed: None }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}
