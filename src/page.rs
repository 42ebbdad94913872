use log::{debug, info, warn};

use crate::Lesson;
use crate::draft::{UploadDraft, UploadPayload, ValidationError};
use crate::preview::{ExtractionError, Preview, compute_preview};
use crate::upload::{UploadError, Uploader};

pub const SUCCESS_MESSAGE: &str = "✅ Video uploaded successfully!";

/// Why a submission did not end with a playable preview
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("upload failed: {0}")]
    Transport(#[from] UploadError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("response to submission {seq} arrived after a newer one")]
    Stale { seq: u64 },
}

impl SubmitError {
    /// The line shown on the page
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::Transport(e) => format!("❌ Upload failed: {}", e.user_detail()),
            SubmitError::Extraction(e) => format!("❌ Upload failed: {e}"),
            SubmitError::Stale { .. } => self.to_string(),
        }
    }
}

/// A submission that passed validation and is waiting for the backend
#[derive(Debug)]
pub struct Submission {
    pub seq: u64,
    pub payload: UploadPayload,
}

/// State of the upload page: the draft being edited, the last message, the last preview
#[derive(Debug)]
pub struct UploadPage {
    pub draft: UploadDraft,
    base_url: String,
    message: Option<String>,
    preview: Option<Preview>,
    next_seq: u64,
    applied_seq: Option<u64>,
}

impl UploadPage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            draft: UploadDraft::default(),
            base_url: base_url.into(),
            message: None,
            preview: None,
            next_seq: 0,
            applied_seq: None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Validate the draft and hand out a sequence number for the request.
    /// A refused draft leaves the current preview alone.
    pub fn begin_submit(&mut self) -> Result<Submission, ValidationError> {
        let payload = self.draft.to_payload().inspect_err(|e| {
            debug!("Draft refused: {e}");
            self.message = Some(e.to_string());
        })?;

        let seq = self.next_seq;
        self.next_seq += 1;
        Ok(Submission { seq, payload })
    }

    /// Apply the backend's answer for submission `seq`.
    /// A response older than one already applied is dropped without touching the page.
    pub fn finish_submit(
        &mut self,
        seq: u64,
        outcome: Result<Lesson, UploadError>,
    ) -> Result<Preview, SubmitError> {
        if self.applied_seq.is_some_and(|applied| seq < applied) {
            warn!("Dropping stale response for submission {seq}");
            return Err(SubmitError::Stale { seq });
        }
        self.applied_seq = Some(seq);

        let result = outcome
            .map_err(SubmitError::from)
            .and_then(|lesson| Ok(compute_preview(&lesson, &self.base_url)?));

        match &result {
            Ok(preview) => {
                info!("Submission {seq} uploaded, preview at {}", preview.target);
                self.message = Some(SUCCESS_MESSAGE.to_string());
                self.preview = Some(preview.clone());
            }
            Err(e) => {
                warn!("Submission {seq} failed: {e}");
                self.message = Some(e.user_message());
                self.preview = None;
            }
        }
        result
    }

    /// Validate, upload and apply the result in one go
    pub async fn submit<U: Uploader>(&mut self, uploader: &U) -> Result<Preview, SubmitError> {
        let Submission { seq, payload } = self.begin_submit()?;
        let outcome = uploader.upload(payload).await;
        self.finish_submit(seq, outcome)
    }
}
