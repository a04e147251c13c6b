use std::time::Duration;

use decksmith_logging::{deck_debug, deck_info, deck_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{
    EngineEvent, FailureKind, GenerateError, GenerateRequest, GeneratedDeck, SubmissionId,
};

/// Path of the generate endpoint, relative to the configured base URL.
pub const GENERATE_PATH: &str = "api/generate";

const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";
const POTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.template";
const OCTET_STREAM: &str = "application/octet-stream";

/// Connection settings for the generate call.
///
/// The defaults match a plain browser submission: no timeout, no retries and
/// no response size cap. Everything else is opt-in.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Base URL of the backend; [`GENERATE_PATH`] is appended to it.
    pub endpoint: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    /// Extra attempts after a timeout or network failure.
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub max_response_bytes: Option<u64>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
            max_response_bytes: None,
        }
    }
}

impl GenerateSettings {
    /// Resolves `{endpoint}/api/generate`, keeping any path prefix on the base.
    pub fn generate_url(&self) -> Result<Url, GenerateError> {
        let mut base = Url::parse(&self.endpoint)
            .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(GenerateError::new(
                FailureKind::InvalidEndpoint,
                format!("{} cannot be a base url", self.endpoint),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(GENERATE_PATH)
            .map_err(|err| GenerateError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(
        &self,
        id: SubmissionId,
        request: &GenerateRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GeneratedDeck, GenerateError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: GenerateSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: GenerateSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| GenerateError::new(FailureKind::Network, err.to_string()))
    }

    async fn attempt(
        &self,
        client: &reqwest::Client,
        url: &Url,
        id: SubmissionId,
        request: &GenerateRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GeneratedDeck, GenerateError> {
        let form = build_form(request)?;
        let response = client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let backend_message = match response.bytes().await {
                Ok(body) => parse_error_body(&body),
                Err(err) => {
                    deck_debug!("Submission {} error body unreadable: {}", id, err);
                    None
                }
            };
            return Err(
                GenerateError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_backend_message(backend_message),
            );
        }

        if let (Some(max_bytes), Some(content_len)) =
            (self.settings.max_response_bytes, response.content_length())
        {
            if content_len > max_bytes {
                return Err(GenerateError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        sink.emit(EngineEvent::Progress {
            id,
            bytes_received: 0,
        });

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if let Some(max_bytes) = self.settings.max_response_bytes {
                if next_len > max_bytes {
                    return Err(GenerateError::new(
                        FailureKind::TooLarge {
                            max_bytes,
                            actual: Some(next_len),
                        },
                        "response too large",
                    ));
                }
            }
            bytes.extend_from_slice(&chunk);
            sink.emit(EngineEvent::Progress {
                id,
                bytes_received: bytes.len() as u64,
            });
        }

        Ok(GeneratedDeck {
            bytes,
            content_type,
        })
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        id: SubmissionId,
        request: &GenerateRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GeneratedDeck, GenerateError> {
        let url = self.settings.generate_url()?;
        let client = self.build_client()?;
        deck_info!(
            "Submission {} -> {} text_len={} template={} template_bytes={}",
            id,
            url,
            request.text.len(),
            request.template.file_name,
            request.template.content.len()
        );

        let mut attempt = 0u32;
        loop {
            match self.attempt(&client, &url, id, request, sink).await {
                Err(err) if err.is_retryable() && attempt < self.settings.max_retries => {
                    attempt += 1;
                    deck_warn!(
                        "Submission {} attempt {} failed ({}); retrying in {:?}",
                        id,
                        attempt,
                        err,
                        self.settings.retry_backoff
                    );
                    tokio::time::sleep(self.settings.retry_backoff).await;
                }
                result => return result,
            }
        }
    }
}

/// MIME type for the template part, by file extension.
pub fn template_mime_type(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pptx") {
        PPTX_MIME
    } else if lower.ends_with(".potx") {
        POTX_MIME
    } else {
        OCTET_STREAM
    }
}

fn build_form(request: &GenerateRequest) -> Result<Form, GenerateError> {
    let template = &request.template;
    let part = Part::stream_with_length(
        reqwest::Body::from(template.content.clone()),
        template.content.len() as u64,
    )
    .file_name(template.file_name.clone())
    .mime_str(template_mime_type(&template.file_name))
    .map_err(|err| GenerateError::new(FailureKind::InvalidTemplate, err.to_string()))?;

    Ok(Form::new()
        .text("text", request.text.clone())
        .text("guidance", request.guidance.clone())
        .text("apiKey", request.api_key.clone())
        .part("template", part))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extracts `error` from a `{ "error": string }` body; anything else yields `None`.
fn parse_error_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> GenerateError {
    if err.is_timeout() {
        return GenerateError::new(FailureKind::Timeout, err.to_string());
    }
    GenerateError::new(FailureKind::Network, err.to_string())
}
