//! Integration tests for the GraphQL-over-HTTP client against a mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notewire_client::{BackendConfig, GraphqlNotesClient};
use notewire_core::{
    CreateNoteInput, DeleteNoteInput, Error, NotesBackend, UpdateNoteInput,
};

fn client_for(server: &MockServer) -> GraphqlNotesClient {
    let config = BackendConfig::new(format!("{}/graphql", server.uri())).with_timeout_secs(5);
    GraphqlNotesClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn test_list_notes_maps_items_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({"operationName": "ListNotes"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "listNotes": {
                    "items": [
                        {"id": "n1", "note": "first"},
                        {"id": "n2", "note": "second"}
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let notes = client.list_notes().await.expect("list should succeed");

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id.as_str(), "n1");
    assert_eq!(notes[0].text, "first");
    assert_eq!(notes[1].id.as_str(), "n2");
}

#[tokio::test]
async fn test_create_note_sends_input_and_returns_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "CreateNote",
            "variables": {"input": {"note": "buy milk"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"createNote": {"id": "assigned-1", "note": "buy milk"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let note = client
        .create_note(CreateNoteInput {
            text: "buy milk".to_string(),
        })
        .await
        .expect("create should succeed");

    assert_eq!(note.id.as_str(), "assigned-1");
    assert_eq!(note.text, "buy milk");
}

#[tokio::test]
async fn test_update_note_round_trips_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "UpdateNote",
            "variables": {"input": {"id": "n1", "note": "revised"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"updateNote": {"id": "n1", "note": "revised"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let note = client
        .update_note(UpdateNoteInput {
            id: "n1".into(),
            text: "revised".to_string(),
        })
        .await
        .expect("update should succeed");

    assert_eq!(note.text, "revised");
}

#[tokio::test]
async fn test_delete_note_returns_acknowledged_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "DeleteNote",
            "variables": {"input": {"id": "n1"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"deleteNote": {"id": "n1"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gone = client
        .delete_note(DeleteNoteInput { id: "n1".into() })
        .await
        .expect("delete should succeed");

    assert_eq!(gone.id.as_str(), "n1");
}

#[tokio::test]
async fn test_graphql_errors_surface_as_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                {"message": "Unauthorized", "path": ["listNotes"]},
                {"message": "Rate exceeded"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.list_notes().await {
        Err(Error::Backend(msg)) => {
            assert!(msg.contains("Unauthorized"));
            assert!(msg.contains("Rate exceeded"));
        }
        other => panic!("expected Backend error, got {:?}", other.map(|n| n.len())),
    }
}

#[tokio::test]
async fn test_http_failure_surfaces_as_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.list_notes().await {
        Err(Error::Request(msg)) => assert!(msg.contains("502")),
        other => panic!("expected Request error, got {:?}", other.map(|n| n.len())),
    }
}

#[tokio::test]
async fn test_api_key_is_attached_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-api-key", "da2-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"listNotes": {"items": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = BackendConfig::new(format!("{}/graphql", server.uri()))
        .with_api_key("da2-secret")
        .with_timeout_secs(5);
    let client = GraphqlNotesClient::new(&config).expect("client should build");

    assert!(client.list_notes().await.is_ok());
}

#[tokio::test]
async fn test_api_key_is_absent_when_unconfigured() {
    let server = MockServer::start().await;
    // Any request carrying the header would match this and fail the count.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_exists("x-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"listNotes": {"items": []}}
        })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"listNotes": {"items": []}}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.list_notes().await.is_ok());
}

#[tokio::test]
async fn test_empty_list_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"listNotes": {"items": []}}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let notes = client.list_notes().await.expect("list should succeed");
    assert!(notes.is_empty());
}
