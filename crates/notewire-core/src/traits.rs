//! Core traits for notewire abstractions.
//!
//! `NotesBackend` is the seam between the session and the transport: the
//! GraphQL HTTP client implements it for production, and the in-memory mock
//! implements it for tests.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::Result;
use crate::events::{EventStreamKind, NoteEvent};
use crate::models::*;

/// Stream of events from one remote subscription.
///
/// Ends when the backend completes the subscription or the connection drops.
pub type NoteEventStream = Pin<Box<dyn Stream<Item = Result<NoteEvent>> + Send>>;

/// The managed notes backend: four request shapes and three event streams.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// Fetch all notes.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Create a note. The backend assigns the id.
    async fn create_note(&self, input: CreateNoteInput) -> Result<Note>;

    /// Replace a note's content.
    async fn update_note(&self, input: UpdateNoteInput) -> Result<Note>;

    /// Delete a note.
    async fn delete_note(&self, input: DeleteNoteInput) -> Result<DeletedNote>;

    /// Open one long-lived event subscription.
    async fn subscribe(&self, stream: EventStreamKind) -> Result<NoteEventStream>;
}
