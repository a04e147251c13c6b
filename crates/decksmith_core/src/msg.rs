use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the main text area.
    TextChanged(String),
    /// User edited the optional guidance line.
    GuidanceChanged(String),
    /// User edited the API key field.
    CredentialChanged(String),
    /// User picked (or cleared) the template file.
    TemplateSelected(Option<crate::TemplateFile>),
    /// User clicked Generate.
    SubmitClicked,
    /// Engine progress while the response body streams in.
    DownloadProgress {
        id: crate::SubmissionId,
        bytes_received: u64,
    },
    /// Backend answered 2xx with a binary payload.
    SubmissionSucceeded {
        id: crate::SubmissionId,
        payload: Vec<u8>,
    },
    /// Request failed; `backend_message` is the `error` field of the JSON body, if any.
    SubmissionFailed {
        id: crate::SubmissionId,
        backend_message: Option<String>,
    },
    /// The payload was written to disk.
    DownloadSaved { path: PathBuf },
    /// Writing the payload failed.
    DownloadFailed { message: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
