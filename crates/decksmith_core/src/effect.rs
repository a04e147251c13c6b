use crate::{SubmissionId, ValidForm};

/// Side effects requested by [`crate::update`]; executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one generate request for this form snapshot.
    Submit { id: SubmissionId, form: ValidForm },
    /// Materialize a returned payload as a local file.
    SaveDownload { filename: String, payload: Vec<u8> },
}
