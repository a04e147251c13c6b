//! DeckSmith engine: HTTP submission and download persistence.
mod engine;
mod generate;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use generate::{
    template_mime_type, GenerateSettings, ProgressSink, ReqwestSubmitter, Submitter,
    GENERATE_PATH,
};
pub use persist::{ensure_output_dir, save_as_file, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, GenerateError, GenerateRequest, GeneratedDeck, SubmissionId,
    TemplateUpload,
};
