use crate::{
    validate, AppState, Effect, Msg, SubmissionStatus, DOWNLOAD_FILENAME, FALLBACK_ERROR_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextChanged(text) => {
            state.form_mut().text = text;
            Vec::new()
        }
        Msg::GuidanceChanged(guidance) => {
            state.form_mut().guidance = guidance;
            Vec::new()
        }
        Msg::CredentialChanged(credential) => {
            state.form_mut().credential = credential;
            Vec::new()
        }
        Msg::TemplateSelected(template) => {
            state.form_mut().template = template;
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The trigger is disabled while in flight; a click that slips through is dropped.
            if state.status().is_in_flight() {
                return (state, Vec::new());
            }
            match validate(state.form()) {
                Ok(form) => {
                    let id = state.next_submission_id();
                    state.set_status(SubmissionStatus::InFlight {
                        id,
                        bytes_received: 0,
                    });
                    vec![Effect::Submit { id, form }]
                }
                Err(err) => {
                    state.set_status(SubmissionStatus::Failed(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::DownloadProgress { id, bytes_received } => {
            if state.is_current(id) {
                state.set_status(SubmissionStatus::InFlight { id, bytes_received });
            }
            Vec::new()
        }
        Msg::SubmissionSucceeded { id, payload } => {
            if !state.is_current(id) {
                return (state, Vec::new());
            }
            state.set_status(SubmissionStatus::Succeeded);
            vec![Effect::SaveDownload {
                filename: DOWNLOAD_FILENAME.to_string(),
                payload,
            }]
        }
        Msg::SubmissionFailed {
            id,
            backend_message,
        } => {
            if state.is_current(id) {
                let message = backend_message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                state.set_status(SubmissionStatus::Failed(message));
            }
            Vec::new()
        }
        Msg::DownloadSaved { path } => {
            state.set_last_download(path);
            Vec::new()
        }
        Msg::DownloadFailed { message } => {
            // A newer submission owns the status once it is in flight.
            if !state.status().is_in_flight() {
                state.set_status(SubmissionStatus::Failed(message));
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
