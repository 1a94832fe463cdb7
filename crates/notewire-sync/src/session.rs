//! Session driving a note collection against a backend.
//!
//! The session owns the collection and the backend handle. Mutations are
//! submitted without touching the collection; only events drained from the
//! inbound channel mutate it, so a submission and its echoed event cannot
//! double-apply. The UI layer drains the channel and calls
//! [`NotesSession::apply_event`], keeping all collection mutations on one
//! task.

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use notewire_core::{
    defaults, CreateNoteInput, DeleteNoteInput, DeletedNote, Error, EventEnvelope,
    EventStreamKind, Note, NoteId, NotesBackend, Result, UpdateNoteInput,
};

use crate::reconciler::{Applied, NoteCollection};

/// Handle over the three running event subscriptions.
///
/// Dropping it without calling [`SubscriptionSet::shutdown`] leaves the
/// forwarder tasks running until their streams end or the event receiver is
/// dropped.
pub struct SubscriptionSet {
    shutdown_tx: broadcast::Sender<()>,
    tasks: Vec<JoinHandle<()>>,
}

impl SubscriptionSet {
    /// Signal all forwarders to stop and wait for them to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        for task in self.tasks {
            let _ = task.await;
        }
    }

    /// Number of forwarder tasks still running.
    pub fn active_streams(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

/// View-model for the note list: local collection + backend operations.
pub struct NotesSession {
    backend: Arc<dyn NotesBackend>,
    collection: NoteCollection,
    event_buffer: usize,
}

impl NotesSession {
    /// Create a session over the given backend.
    pub fn new(backend: Arc<dyn NotesBackend>) -> Self {
        Self {
            backend,
            collection: NoteCollection::new(),
            event_buffer: defaults::EVENT_CHANNEL_CAPACITY,
        }
    }

    /// Set the inbound event channel capacity.
    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// The current local collection.
    pub fn collection(&self) -> &NoteCollection {
        &self.collection
    }

    /// Replace the local collection with a full remote fetch.
    ///
    /// Called once at startup. Failure propagates and leaves the collection
    /// unchanged.
    #[instrument(skip(self), fields(subsystem = "sync", component = "session", op = "load_all"))]
    pub async fn load_all(&mut self) -> Result<usize> {
        let notes = self.backend.list_notes().await?;
        let count = notes.len();
        self.collection.reset(notes);
        info!(result_count = count, "Loaded notes");
        Ok(count)
    }

    /// Submit a create request.
    ///
    /// Does not insert locally; the echoed create event does. The returned
    /// note carries the backend-assigned id.
    #[instrument(skip(self, text), fields(subsystem = "sync", component = "session", op = "submit_create"))]
    pub async fn submit_create(&self, text: &str) -> Result<Note> {
        validate_text(text)?;
        let note = self
            .backend
            .create_note(CreateNoteInput {
                text: text.to_string(),
            })
            .await?;
        debug!(note_id = %note.id, "Create submitted");
        Ok(note)
    }

    /// Submit an update request; the echoed update event applies it.
    #[instrument(skip(self, text), fields(subsystem = "sync", component = "session", op = "submit_update", note_id = %id))]
    pub async fn submit_update(&self, id: &NoteId, text: &str) -> Result<Note> {
        validate_text(text)?;
        self.backend
            .update_note(UpdateNoteInput {
                id: id.clone(),
                text: text.to_string(),
            })
            .await
    }

    /// Submit a delete request; the echoed delete event removes the entry.
    #[instrument(skip(self), fields(subsystem = "sync", component = "session", op = "submit_delete", note_id = %id))]
    pub async fn submit_delete(&self, id: &NoteId) -> Result<DeletedNote> {
        self.backend
            .delete_note(DeleteNoteInput { id: id.clone() })
            .await
    }

    /// Establish the three event subscriptions.
    ///
    /// All streams are opened before any forwarder task is spawned, so a
    /// failed subscription leaves nothing running. Each forwarder normalizes
    /// its stream into the shared inbound channel the caller drains.
    pub async fn subscribe(&self) -> Result<(SubscriptionSet, mpsc::Receiver<EventEnvelope>)> {
        let mut streams = Vec::with_capacity(EventStreamKind::ALL.len());
        for kind in EventStreamKind::ALL {
            streams.push((kind, self.backend.subscribe(kind).await?));
        }

        let (event_tx, event_rx) = mpsc::channel(self.event_buffer);
        let (shutdown_tx, _) = broadcast::channel(1);

        let mut tasks = Vec::with_capacity(streams.len());
        for (kind, mut stream) in streams {
            let tx = event_tx.clone();
            let mut shutdown_rx = shutdown_tx.subscribe();
            tasks.push(tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = shutdown_rx.recv() => {
                            debug!(event_stream = kind.as_str(), "Subscription shut down");
                            break;
                        }
                        item = stream.next() => match item {
                            Some(Ok(event)) => {
                                if tx.send(EventEnvelope::new(kind, event)).await.is_err() {
                                    break;
                                }
                            }
                            Some(Err(e)) => {
                                warn!(
                                    event_stream = kind.as_str(),
                                    error = %e,
                                    "Event stream error"
                                );
                            }
                            None => {
                                info!(event_stream = kind.as_str(), "Event stream ended");
                                break;
                            }
                        },
                    }
                }
            }));
        }

        info!(
            subsystem = "sync",
            component = "session",
            streams = tasks.len(),
            "Subscribed to note events"
        );
        Ok((SubscriptionSet { shutdown_tx, tasks }, event_rx))
    }

    /// Apply one drained event to the collection.
    pub fn apply_event(&mut self, envelope: EventEnvelope) -> Applied {
        let EventEnvelope {
            received_at,
            stream,
            event,
        } = envelope;

        let queued_ms = (Utc::now() - received_at).num_milliseconds();
        let applied = self.collection.apply(event);
        debug!(
            subsystem = "sync",
            component = "reconciler",
            op = "apply_event",
            event_stream = stream.as_str(),
            note_id = %applied.note_id(),
            outcome = applied.as_str(),
            queued_ms,
            result_count = self.collection.len(),
            "Applied remote event"
        );
        applied
    }
}

/// Reject empty or whitespace-only note text.
fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("note text cannot be empty".to_string()));
    }
    Ok(())
}
