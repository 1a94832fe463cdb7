//! GraphQL-over-HTTP implementation of the notes backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use notewire_core::{
    defaults, CreateNoteInput, DeleteNoteInput, DeletedNote, Error, EventStreamKind, ListNotesPage,
    Note, NoteEventStream, NotesBackend, Result, UpdateNoteInput,
};

use crate::config::BackendConfig;
use crate::documents;
use crate::subscription;
use crate::wire::{GraphqlRequest, GraphqlResponse};

/// Client for a managed GraphQL notes backend.
///
/// Queries and mutations are single POSTs; subscriptions are long-lived SSE
/// responses (see [`crate::subscription`]). One instance is cheap to clone
/// via `Arc` and safe to share.
pub struct GraphqlNotesClient {
    client: Client,
    /// Subscription connections are long-lived; this client bounds only the
    /// connect phase, not the whole response.
    stream_client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GraphqlNotesClient {
    /// Create a client from a validated configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        let stream_client = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        info!(
            subsystem = "client",
            endpoint = %config.endpoint,
            has_api_key = config.api_key.is_some(),
            "Initializing notes backend client"
        );

        Ok(Self {
            client,
            stream_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&BackendConfig::from_env()?)
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one query/mutation document and decode its `data` payload.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        operation: &'static str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request_id = Uuid::now_v7();
        let start = Instant::now();

        let body = GraphqlRequest {
            query: document,
            operation_name: operation,
            variables,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header(defaults::API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Request(format!("{} request failed: {}", operation, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "backend returned {}: {}",
                status, body
            )));
        }

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("failed to parse response: {}", e)))?;

        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            subsystem = "client",
            component = "graphql",
            op = operation,
            request_id = %request_id,
            duration_ms = elapsed,
            "Operation complete"
        );
        if elapsed > defaults::SLOW_REQUEST_MS {
            warn!(
                op = operation,
                request_id = %request_id,
                duration_ms = elapsed,
                slow = true,
                "Slow backend operation"
            );
        }

        envelope.into_data()
    }
}

// Per-operation `data` payload wrappers.

#[derive(Deserialize)]
struct ListNotesData {
    #[serde(rename = "listNotes")]
    list_notes: ListNotesPage,
}

#[derive(Deserialize)]
struct CreateNoteData {
    #[serde(rename = "createNote")]
    create_note: Note,
}

#[derive(Deserialize)]
struct UpdateNoteData {
    #[serde(rename = "updateNote")]
    update_note: Note,
}

#[derive(Deserialize)]
struct DeleteNoteData {
    #[serde(rename = "deleteNote")]
    delete_note: DeletedNote,
}

#[async_trait]
impl NotesBackend for GraphqlNotesClient {
    #[instrument(skip(self), fields(subsystem = "client", op = "list_notes"))]
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let data: ListNotesData = self
            .execute(documents::LIST_NOTES, "ListNotes", None)
            .await?;
        debug!(result_count = data.list_notes.items.len(), "Fetched notes");
        Ok(data.list_notes.items)
    }

    #[instrument(skip(self, input), fields(subsystem = "client", op = "create_note"))]
    async fn create_note(&self, input: CreateNoteInput) -> Result<Note> {
        let variables = serde_json::json!({ "input": input });
        let data: CreateNoteData = self
            .execute(documents::CREATE_NOTE, "CreateNote", Some(variables))
            .await?;
        Ok(data.create_note)
    }

    #[instrument(skip(self, input), fields(subsystem = "client", op = "update_note", note_id = %input.id))]
    async fn update_note(&self, input: UpdateNoteInput) -> Result<Note> {
        let variables = serde_json::json!({ "input": input });
        let data: UpdateNoteData = self
            .execute(documents::UPDATE_NOTE, "UpdateNote", Some(variables))
            .await?;
        Ok(data.update_note)
    }

    #[instrument(skip(self, input), fields(subsystem = "client", op = "delete_note", note_id = %input.id))]
    async fn delete_note(&self, input: DeleteNoteInput) -> Result<DeletedNote> {
        let variables = serde_json::json!({ "input": input });
        let data: DeleteNoteData = self
            .execute(documents::DELETE_NOTE, "DeleteNote", Some(variables))
            .await?;
        Ok(data.delete_note)
    }

    #[instrument(skip(self), fields(subsystem = "client", op = "subscribe", event_stream = stream.as_str()))]
    async fn subscribe(&self, stream: EventStreamKind) -> Result<NoteEventStream> {
        subscription::open_event_stream(
            &self.stream_client,
            &self.endpoint,
            self.api_key.as_deref(),
            stream,
        )
        .await
    }
}
