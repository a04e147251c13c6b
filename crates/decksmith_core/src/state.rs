use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, BUTTON_LABEL_BUSY, BUTTON_LABEL_IDLE};
use crate::FormState;

pub type SubmissionId = u64;

/// Suggested name for the returned presentation.
pub const DOWNLOAD_FILENAME: &str = "generated_presentation.pptx";

/// Shown when a failure carries no backend-supplied message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred. Check the backend console.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    InFlight {
        id: SubmissionId,
        bytes_received: u64,
    },
    Failed(String),
    Succeeded,
}

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionStatus::InFlight { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    status: SubmissionStatus,
    last_submission: SubmissionId,
    last_download: Option<PathBuf>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn last_download(&self) -> Option<&Path> {
        self.last_download.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let in_flight = self.status.is_in_flight();
        let (status_label, error_banner, bytes_received) = match &self.status {
            SubmissionStatus::Idle => ("Idle", None, None),
            SubmissionStatus::InFlight { bytes_received, .. } => {
                ("Generating", None, Some(*bytes_received))
            }
            SubmissionStatus::Failed(message) => ("Failed", Some(message.clone()), None),
            SubmissionStatus::Succeeded => ("Done", None, None),
        };

        AppViewModel {
            status_label,
            submit_enabled: !in_flight,
            button_label: if in_flight {
                BUTTON_LABEL_BUSY
            } else {
                BUTTON_LABEL_IDLE
            },
            error_banner,
            text_len: self.form.text.chars().count(),
            has_guidance: !self.form.guidance.is_empty(),
            has_credential: !self.form.credential.is_empty(),
            template_name: self
                .form
                .template
                .as_ref()
                .map(|template| template.file_name.clone()),
            bytes_received,
            last_download: self.last_download.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.dirty = true;
        &mut self.form
    }

    pub(crate) fn set_status(&mut self, status: SubmissionStatus) {
        self.status = status;
        self.dirty = true;
    }

    /// Allocates the id for the next accepted submission.
    pub(crate) fn next_submission_id(&mut self) -> SubmissionId {
        self.last_submission += 1;
        self.last_submission
    }

    /// True if `id` belongs to the submission currently in flight.
    pub(crate) fn is_current(&self, id: SubmissionId) -> bool {
        matches!(self.status, SubmissionStatus::InFlight { id: current, .. } if current == id)
    }

    pub(crate) fn set_last_download(&mut self, path: PathBuf) {
        self.last_download = Some(path);
        self.dirty = true;
    }
}
