//! Report wizard
//!
//! A three-step flow that turns partial submissions into one committed
//! missing-person report:
//!
//! 1. **Basic information**: name, gender, age, last seen location, description, area
//! 2. **Photos**: uploads are checked and held in the staging area
//! 3. **Contacts**: at least one contact, then the whole draft is committed
//!
//! The wizard is a function of `(WizardState, WizardAction)`. Loading and
//! saving the state, and serializing requests per session, belong to the
//! caller.

pub mod commit;
pub mod input;
pub mod locks;
pub mod state;

pub use input::{StepInput, UploadedFile};
pub use locks::SessionLocks;
pub use state::{
    BasicInfo, CommittedReport, ContactRow, DraftReport, Notice, NoticeLevel, PhotoUpload,
    StagedPhoto, WizardAction, WizardOutcome, WizardState, WizardStep,
};

use crate::storage::{MediaStore, PhotoStaging};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{error, info, warn};

/// Notice shown when steps 2 or 3 arrive before step 1 is complete
pub const BASIC_INFO_FIRST: &str = "Please complete the basic information first.";

/// Notice shown after a commit failure
pub const COMMIT_FAILED: &str =
    "An error occurred while submitting your report. Uploaded photos were discarded; \
     please add them again or submit without them.";

pub const REPORT_SUBMITTED: &str = "Thank you. Your report has been submitted.";

/// Wizard errors; these never leave the wizard as errors, they become notices
#[derive(Debug, Error)]
pub enum WizardError {
    /// Input problem the visitor can fix on `step`
    #[error("{message}")]
    Validation { step: WizardStep, message: String },

    /// Storage or database failure
    #[error("Store error: {0}")]
    Store(#[from] knmp_common::Error),
}

/// Wizard operations over the three collaborators it coordinates
#[derive(Debug, Clone, Copy)]
pub struct Wizard<'a> {
    db: &'a SqlitePool,
    staging: &'a PhotoStaging,
    media: &'a MediaStore,
    max_photo_bytes: u64,
}

impl<'a> Wizard<'a> {
    pub fn new(
        db: &'a SqlitePool,
        staging: &'a PhotoStaging,
        media: &'a MediaStore,
        max_photo_bytes: u64,
    ) -> Self {
        Self { db, staging, media, max_photo_bytes }
    }

    /// Resume a stored state or start at step 1 with an empty draft
    pub fn start_or_resume(stored: Option<WizardState>) -> WizardState {
        stored.unwrap_or_default()
    }

    /// Step back one step
    ///
    /// Leaving step 2 for step 1 discards the staged photos and their files.
    pub async fn go_to_previous_step(&self, mut state: WizardState) -> WizardState {
        if state.step == WizardStep::Photos && !state.draft.photos.is_empty() {
            let names = state.draft.staged_names();
            self.staging.delete_all(names.iter().map(String::as_str)).await;
            state.draft.photos.clear();
        }
        state.step = state.step.previous();
        state
    }

    /// Store step 1 fields as submitted and move to step 2
    pub fn submit_basic_info(mut state: WizardState, info: BasicInfo) -> WizardState {
        state.draft.basic = Some(info);
        state.step = WizardStep::Photos;
        state
    }

    /// Stage acceptable uploads and move to step 3
    ///
    /// Oversized and non-image files are skipped with a notice each. Accepted
    /// photos are appended to those already staged.
    pub async fn submit_photos(
        &self,
        mut state: WizardState,
        uploads: Vec<PhotoUpload>,
    ) -> (WizardState, Vec<Notice>) {
        let mut notices = Vec::new();

        for upload in uploads {
            if let Some(reason) = self.rejection_reason(&upload) {
                notices.push(Notice::error(format!("{}: {}", upload.file_name, reason)));
                continue;
            }

            match self.staging.stage(&upload.file_name, &upload.data).await {
                Ok(staged_name) => state.draft.photos.push(StagedPhoto {
                    staged_name,
                    original_name: upload.file_name,
                    content_type: upload.content_type,
                    size: upload.data.len() as u64,
                    description: upload.description,
                    alt_text: upload.alt_text,
                }),
                Err(e) => {
                    warn!(file_name = %upload.file_name, "Failed to stage upload: {}", e);
                    notices.push(Notice::error(format!(
                        "{}: the photo could not be saved, please try again.",
                        upload.file_name
                    )));
                }
            }
        }

        state.step = WizardStep::Contacts;
        (state, notices)
    }

    fn rejection_reason(&self, upload: &PhotoUpload) -> Option<String> {
        if upload.data.len() as u64 > self.max_photo_bytes {
            let limit_mb = (self.max_photo_bytes / (1024 * 1024)).max(1);
            return Some(format!(
                "Image file too large. Please keep it under {}MB.",
                limit_mb
            ));
        }
        if !upload.content_type.starts_with("image/") {
            return Some("Please upload a valid image file.".to_string());
        }
        None
    }

    /// Validate the draft with the submitted contacts and commit it
    ///
    /// Validation failures route back to the step that needs fixing and keep
    /// the draft. A commit failure discards the staged photos and returns to
    /// step 3. Success clears the state.
    pub async fn submit_contacts(
        &self,
        mut state: WizardState,
        rows: Vec<ContactRow>,
    ) -> WizardOutcome {
        let report = match commit::validate(&state.draft, &rows) {
            Ok(report) => report,
            Err(WizardError::Validation { step, message }) => {
                state.step = step;
                return WizardOutcome::new(state).with_notice(Notice::error(message));
            }
            Err(WizardError::Store(e)) => return self.commit_failed(state, &e).await,
        };

        let committed = commit::commit_report(
            self.db,
            self.staging,
            self.media,
            &report,
            &state.draft.photos,
        )
        .await;

        match committed {
            Ok(person) => {
                let mut outcome = WizardOutcome::new(WizardState::default())
                    .with_notice(Notice::success(REPORT_SUBMITTED));
                outcome.committed = Some(CommittedReport {
                    person_id: person.id,
                    slug: person.slug,
                    name: person.name,
                });
                outcome
            }
            Err(e) => self.commit_failed(state, &e).await,
        }
    }

    async fn commit_failed(
        &self,
        mut state: WizardState,
        e: &knmp_common::Error,
    ) -> WizardOutcome {
        error!("Report commit failed: {}", e);

        let names = state.draft.staged_names();
        self.staging.delete_all(names.iter().map(String::as_str)).await;
        state.draft.photos.clear();
        state.step = WizardStep::Contacts;

        WizardOutcome::new(state).with_notice(Notice::error(COMMIT_FAILED))
    }

    /// Apply one visitor action
    ///
    /// Steps 2 and 3 need step 1 data; without it the visitor is sent back to
    /// step 1 and nothing is staged or committed.
    pub async fn handle(&self, state: WizardState, action: WizardAction) -> WizardOutcome {
        match action {
            WizardAction::PreviousStep => WizardOutcome::new(self.go_to_previous_step(state).await),
            WizardAction::SubmitBasicInfo(info) => {
                WizardOutcome::new(Self::submit_basic_info(state, info))
            }
            WizardAction::SubmitPhotos(_) | WizardAction::SubmitContacts(_)
                if state.draft.basic.is_none() =>
            {
                info!("Wizard step submitted before basic information, resuming at step 1");
                let state = WizardState { step: WizardStep::BasicInfo, ..state };
                WizardOutcome::new(state).with_notice(Notice::info(BASIC_INFO_FIRST))
            }
            WizardAction::SubmitPhotos(uploads) => {
                let (state, notices) = self.submit_photos(state, uploads).await;
                WizardOutcome { state, notices, committed: None }
            }
            WizardAction::SubmitContacts(rows) => self.submit_contacts(state, rows).await,
            WizardAction::Redisplay => WizardOutcome::new(state),
        }
    }
}
