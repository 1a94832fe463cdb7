//! Mock notes backend for deterministic testing.
//!
//! Behaves like the managed service from the session's point of view: it
//! owns the authoritative note store, assigns ids on create, and (by
//! default) echoes every mutation back on the matching event stream.
//!
//! ## Usage
//!
//! ```ignore
//! use notewire_client::MockNotesBackend;
//!
//! let backend = MockNotesBackend::new()
//!     .with_notes(vec![Note::new("note-0001", "seeded")])
//!     .with_echo(false);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use notewire_core::{
    CreateNoteInput, DeleteNoteInput, DeletedNote, Error, EventStreamKind, Note, NoteEvent,
    NoteEventStream, NotesBackend, Result, UpdateNoteInput,
};

/// Buffer for each mock event stream; tests emit far fewer than this.
const MOCK_STREAM_CAPACITY: usize = 32;

/// In-memory stand-in for the managed notes backend.
#[derive(Clone)]
pub struct MockNotesBackend {
    state: Arc<Mutex<MockState>>,
}

struct MockState {
    notes: Vec<Note>,
    next_id: u64,
    echo_events: bool,
    fail_next: Option<String>,
    call_log: Vec<String>,
    senders: HashMap<EventStreamKind, mpsc::Sender<NoteEvent>>,
}

impl Default for MockNotesBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotesBackend {
    /// Create an empty mock backend that echoes mutations as events.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                notes: Vec::new(),
                next_id: 1,
                echo_events: true,
                fail_next: None,
                call_log: Vec::new(),
                senders: HashMap::new(),
            })),
        }
    }

    /// Seed the remote store.
    pub fn with_notes(self, notes: Vec<Note>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += notes.len() as u64;
            state.notes = notes;
        }
        self
    }

    /// Enable or disable echoing mutations back as events.
    pub fn with_echo(self, echo: bool) -> Self {
        self.state.lock().unwrap().echo_events = echo;
        self
    }

    /// Make the next call of the named operation fail.
    pub fn fail_next(&self, operation: &str) {
        self.state.lock().unwrap().fail_next = Some(operation.to_string());
    }

    /// Operations invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().call_log.clone()
    }

    /// Current remote store contents.
    pub fn remote_notes(&self) -> Vec<Note> {
        self.state.lock().unwrap().notes.clone()
    }

    /// Deliver an event as if the backend pushed it.
    ///
    /// Dropped silently when the matching stream has no subscriber.
    pub fn emit(&self, event: NoteEvent) {
        self.state.lock().unwrap().push_event(event);
    }
}

impl MockState {
    fn record(&mut self, operation: &str) -> Result<()> {
        self.call_log.push(operation.to_string());
        if self.fail_next.as_deref() == Some(operation) {
            self.fail_next = None;
            return Err(Error::Backend(format!("injected failure: {}", operation)));
        }
        Ok(())
    }

    fn push_event(&mut self, event: NoteEvent) {
        let kind = match event {
            NoteEvent::Created(_) => EventStreamKind::Created,
            NoteEvent::Updated(_) => EventStreamKind::Updated,
            NoteEvent::Deleted(_) => EventStreamKind::Deleted,
        };
        if let Some(sender) = self.senders.get(&kind) {
            let _ = sender.try_send(event);
        }
    }

    fn echo(&mut self, event: NoteEvent) {
        if self.echo_events {
            self.push_event(event);
        }
    }
}

#[async_trait]
impl NotesBackend for MockNotesBackend {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut state = self.state.lock().unwrap();
        state.record("list_notes")?;
        Ok(state.notes.clone())
    }

    async fn create_note(&self, input: CreateNoteInput) -> Result<Note> {
        let mut state = self.state.lock().unwrap();
        state.record("create_note")?;

        let note = Note::new(format!("note-{:04}", state.next_id), input.text);
        state.next_id += 1;
        state.notes.push(note.clone());
        state.echo(NoteEvent::Created(note.clone()));
        Ok(note)
    }

    async fn update_note(&self, input: UpdateNoteInput) -> Result<Note> {
        let mut state = self.state.lock().unwrap();
        state.record("update_note")?;

        let position = state.notes.iter().position(|n| n.id == input.id);
        match position {
            Some(idx) => {
                state.notes[idx].text = input.text;
                let note = state.notes[idx].clone();
                state.echo(NoteEvent::Updated(note.clone()));
                Ok(note)
            }
            None => Err(Error::NoteNotFound(input.id)),
        }
    }

    async fn delete_note(&self, input: DeleteNoteInput) -> Result<DeletedNote> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_note")?;

        let position = state.notes.iter().position(|n| n.id == input.id);
        match position {
            Some(idx) => {
                let note = state.notes.remove(idx);
                state.echo(NoteEvent::deleted(note.id.clone()));
                Ok(DeletedNote { id: note.id })
            }
            None => Err(Error::NoteNotFound(input.id)),
        }
    }

    async fn subscribe(&self, stream: EventStreamKind) -> Result<NoteEventStream> {
        let (tx, rx) = mpsc::channel(MOCK_STREAM_CAPACITY);
        self.state.lock().unwrap().senders.insert(stream, tx);
        Ok(Box::pin(futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|event| (Ok(event), rx))
        })))
    }
}
