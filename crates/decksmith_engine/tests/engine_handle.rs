use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use decksmith_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerateError, GenerateRequest, GenerateSettings,
    GeneratedDeck, ProgressSink, Submitter, TemplateUpload,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerateRequest {
    GenerateRequest {
        text: "Hello".to_string(),
        guidance: String::new(),
        api_key: "k".to_string(),
        template: TemplateUpload {
            file_name: "brand.potx".to_string(),
            content: Bytes::from_static(b"template"),
        },
    }
}

/// Collects events until a `Completed` arrives or the deadline passes.
fn drain_until_completed(engine: &EngineHandle, deadline: Duration) -> Vec<EngineEvent> {
    let started = Instant::now();
    let mut events = Vec::new();
    while started.elapsed() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            let done = matches!(event, EngineEvent::Completed { .. });
            events.push(event);
            if done {
                break;
            }
        }
    }
    events
}

struct FakeSubmitter;

#[async_trait::async_trait]
impl Submitter for FakeSubmitter {
    async fn submit(
        &self,
        id: u64,
        request: &GenerateRequest,
        sink: &dyn ProgressSink,
    ) -> Result<GeneratedDeck, GenerateError> {
        sink.emit(EngineEvent::Progress {
            id,
            bytes_received: request.template.content.len() as u64,
        });
        Ok(GeneratedDeck {
            bytes: request.text.as_bytes().to_vec(),
            content_type: None,
        })
    }
}

#[test]
fn handle_forwards_progress_then_completion() {
    let engine = EngineHandle::with_submitter(Arc::new(FakeSubmitter)).unwrap();
    engine.submit(42, request());

    let events = drain_until_completed(&engine, Duration::from_secs(5));

    assert_eq!(
        events,
        vec![
            EngineEvent::Progress {
                id: 42,
                bytes_received: 8
            },
            EngineEvent::Completed {
                id: 42,
                result: Ok(GeneratedDeck {
                    bytes: b"Hello".to_vec(),
                    content_type: None,
                }),
            },
        ]
    );
    assert!(engine.try_recv().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn handle_reports_backend_failure_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw(r#"{"error":"bad key"}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = GenerateSettings {
        endpoint: server.uri(),
        ..GenerateSettings::default()
    };
    let events = tokio::task::spawn_blocking(move || {
        let engine = EngineHandle::new(settings).unwrap();
        engine.submit(7, request());
        drain_until_completed(&engine, Duration::from_secs(10))
    })
    .await
    .unwrap();

    match events.last() {
        Some(EngineEvent::Completed { id, result: Err(err) }) => {
            assert_eq!(*id, 7);
            assert_eq!(err.kind, FailureKind::HttpStatus(500));
            assert_eq!(err.backend_message.as_deref(), Some("bad key"));
        }
        other => panic!("unexpected final event {other:?}"),
    }
}
