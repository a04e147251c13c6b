use std::fmt;

use bytes::Bytes;

pub type SubmissionId = u64;

/// Template part of the multipart body.
#[derive(Clone, PartialEq, Eq)]
pub struct TemplateUpload {
    pub file_name: String,
    pub content: Bytes,
}

impl fmt::Debug for TemplateUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateUpload")
            .field("file_name", &self.file_name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// Everything the generate endpoint receives. Field names match the wire parts.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub text: String,
    pub guidance: String,
    pub api_key: String,
    pub template: TemplateUpload,
}

impl fmt::Debug for GenerateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateRequest")
            .field("text_len", &self.text.len())
            .field("guidance", &self.guidance)
            .field("api_key", &"<redacted>")
            .field("template", &self.template)
            .finish()
    }
}

/// Successful response: the presentation bytes, opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDeck {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress {
        id: SubmissionId,
        bytes_received: u64,
    },
    Completed {
        id: SubmissionId,
        result: Result<GeneratedDeck, GenerateError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct GenerateError {
    pub kind: FailureKind,
    /// Diagnostic detail for logs; not meant for the error banner.
    pub detail: String,
    /// The `error` field of a JSON failure body, when the backend sent one.
    pub backend_message: Option<String>,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            backend_message: None,
        }
    }

    pub(crate) fn with_backend_message(mut self, message: Option<String>) -> Self {
        self.backend_message = message;
        self
    }

    /// Transport-level failures worth another attempt. HTTP answers never are.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, FailureKind::Timeout | FailureKind::Network)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidTemplate,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidTemplate => write!(f, "invalid template part"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
