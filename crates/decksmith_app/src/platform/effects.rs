use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use decksmith_core::{Effect, Msg, ValidForm};
use decksmith_engine::{save_as_file, EngineEvent, EngineHandle, GenerateRequest, TemplateUpload};
use decksmith_logging::{deck_error, deck_info, deck_warn};

pub struct EffectRunner {
    engine: EngineHandle,
    output_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, output_dir: PathBuf) -> Self {
        Self { engine, output_dir }
    }

    /// Executes one effect. Synchronous effects report back with a message.
    pub fn run(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Submit { id, form } => {
                deck_info!("Submit id={} template={}", id, form.template().file_name);
                self.engine.submit(id, to_request(form));
                None
            }
            Effect::SaveDownload { filename, payload } => {
                Some(match save_as_file(&self.output_dir, &filename, &payload) {
                    Ok(path) => Msg::DownloadSaved { path },
                    Err(err) => {
                        deck_error!("Failed to save {} in {:?}: {}", filename, self.output_dir, err);
                        Msg::DownloadFailed {
                            message: format!("Could not save {filename}: {err}"),
                        }
                    }
                })
            }
        }
    }

    /// Waits up to `wait` for the next engine event.
    pub fn next_msg(&self, wait: Duration) -> Option<Msg> {
        self.engine.recv_timeout(wait).map(map_event)
    }

    pub fn try_next_msg(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn to_request(form: ValidForm) -> GenerateRequest {
    let (text, guidance, api_key, template) = form.into_parts();
    GenerateRequest {
        text,
        guidance,
        api_key,
        template: TemplateUpload {
            file_name: template.file_name,
            content: Bytes::from(template.content),
        },
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { id, bytes_received } => Msg::DownloadProgress { id, bytes_received },
        EngineEvent::Completed { id, result } => match result {
            Ok(deck) => {
                deck_info!("Submission {} returned {} bytes", id, deck.bytes.len());
                Msg::SubmissionSucceeded {
                    id,
                    payload: deck.bytes,
                }
            }
            Err(err) => {
                deck_warn!("Submission {} failed: {}", id, err);
                Msg::SubmissionFailed {
                    id,
                    backend_message: err.backend_message,
                }
            }
        },
    }
}
