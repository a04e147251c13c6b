use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use decksmith_logging::{deck_debug, deck_warn};

use crate::generate::{ChannelProgressSink, GenerateSettings, ReqwestSubmitter, Submitter};
use crate::{EngineEvent, GenerateRequest, SubmissionId};

enum EngineCommand {
    Submit {
        id: SubmissionId,
        request: GenerateRequest,
    },
}

/// Runs submissions on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GenerateSettings) -> io::Result<Self> {
        Self::with_submitter(Arc::new(ReqwestSubmitter::new(settings)))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("decksmith-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let submitter = submitter.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(submitter.as_ref(), command, event_tx).await;
                    });
                }
                deck_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, id: SubmissionId, request: GenerateRequest) {
        if self
            .cmd_tx
            .send(EngineCommand::Submit { id, request })
            .is_err()
        {
            deck_warn!("Engine is gone; submission {} dropped", id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { id, request } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = submitter.submit(id, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::Completed { id, result });
        }
    }
}
