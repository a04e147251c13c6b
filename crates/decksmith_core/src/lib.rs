//! DeckSmith core: pure submission state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{
    validate, FormState, RequiredField, TemplateFile, ValidForm, ValidationError,
    VALIDATION_MESSAGE,
};
pub use msg::Msg;
pub use state::{AppState, SubmissionId, SubmissionStatus, DOWNLOAD_FILENAME, FALLBACK_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{AppViewModel, BUTTON_LABEL_BUSY, BUTTON_LABEL_IDLE};
