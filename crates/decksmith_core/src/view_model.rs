use std::path::PathBuf;

pub const BUTTON_LABEL_IDLE: &str = "Generate Presentation";
pub const BUTTON_LABEL_BUSY: &str = "Generating...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status_label: &'static str,
    /// The submit trigger; disabled while a request is in flight.
    pub submit_enabled: bool,
    pub button_label: &'static str,
    pub error_banner: Option<String>,
    pub text_len: usize,
    pub has_guidance: bool,
    pub has_credential: bool,
    pub template_name: Option<String>,
    pub bytes_received: Option<u64>,
    pub last_download: Option<PathBuf>,
    pub dirty: bool,
}
