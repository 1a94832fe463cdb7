//! Integration tests for the SSE subscription feed against a mock server.

use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notewire_client::{BackendConfig, GraphqlNotesClient};
use notewire_core::{Error, EventStreamKind, NoteEvent, NotesBackend};

fn client_for(server: &MockServer) -> GraphqlNotesClient {
    let config = BackendConfig::new(format!("{}/graphql", server.uri())).with_timeout_secs(5);
    GraphqlNotesClient::new(&config).expect("client should build")
}

fn sse_body(frames: &[&str]) -> String {
    frames
        .iter()
        .map(|f| format!("{}\n\n", f))
        .collect::<String>()
}

#[tokio::test]
async fn test_created_stream_yields_typed_events() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        ": keepalive",
        "event: next\ndata: {\"data\":{\"onCreateNote\":{\"id\":\"n1\",\"note\":\"first\"}}}",
        "event: next\ndata: {\"data\":{\"onCreateNote\":{\"id\":\"n2\",\"note\":\"second\"}}}",
        "event: complete\ndata:",
    ]);

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("accept", "text/event-stream"))
        .and(body_partial_json(json!({"operationName": "OnCreateNote"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client
        .subscribe(EventStreamKind::Created)
        .await
        .expect("subscribe should succeed");

    let first = events.next().await.unwrap().unwrap();
    match first {
        NoteEvent::Created(note) => {
            assert_eq!(note.id.as_str(), "n1");
            assert_eq!(note.text, "first");
        }
        other => panic!("expected Created, got {:?}", other),
    }

    let second = events.next().await.unwrap().unwrap();
    assert_eq!(second.note_id().as_str(), "n2");

    // Stream ends after the complete frame.
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_deleted_stream_yields_ids() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        "event: next\ndata: {\"data\":{\"onDeleteNote\":{\"id\":\"gone-1\"}}}",
        "event: complete\ndata:",
    ]);

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({"operationName": "OnDeleteNote"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client
        .subscribe(EventStreamKind::Deleted)
        .await
        .expect("subscribe should succeed");

    let event = events.next().await.unwrap().unwrap();
    assert_eq!(event.event_type(), "Deleted");
    assert_eq!(event.note_id().as_str(), "gone-1");
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_subscribe_rejection_is_a_subscription_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.subscribe(EventStreamKind::Updated).await {
        Err(Error::Subscription(msg)) => assert!(msg.contains("401")),
        Ok(_) => panic!("expected subscribe to fail"),
        Err(other) => panic!("expected Subscription error, got {}", other),
    }
}

#[tokio::test]
async fn test_malformed_frame_surfaces_error_but_keeps_stream() {
    let server = MockServer::start().await;
    let body = sse_body(&[
        "event: next\ndata: {not json}",
        "event: next\ndata: {\"data\":{\"onUpdateNote\":{\"id\":\"n1\",\"note\":\"ok\"}}}",
        "event: complete\ndata:",
    ]);

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut events = client
        .subscribe(EventStreamKind::Updated)
        .await
        .expect("subscribe should succeed");

    assert!(events.next().await.unwrap().is_err());
    let recovered = events.next().await.unwrap().unwrap();
    assert_eq!(recovered.note_id().as_str(), "n1");
    assert!(events.next().await.is_none());
}
