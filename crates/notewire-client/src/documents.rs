//! GraphQL operation documents for the managed notes backend.
//!
//! The backend contract is seven fixed documents; they are carried as consts
//! and sent verbatim, with variables supplied as JSON.

use notewire_core::EventStreamKind;

/// Fetch all notes.
pub const LIST_NOTES: &str = "\
query ListNotes {
  listNotes {
    items {
      id
      note
    }
  }
}";

/// Create a note. The backend assigns the id.
pub const CREATE_NOTE: &str = "\
mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) {
    id
    note
  }
}";

/// Replace a note's content.
pub const UPDATE_NOTE: &str = "\
mutation UpdateNote($input: UpdateNoteInput!) {
  updateNote(input: $input) {
    id
    note
  }
}";

/// Delete a note.
pub const DELETE_NOTE: &str = "\
mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) {
    id
  }
}";

/// Notification: a note was created.
pub const ON_CREATE_NOTE: &str = "\
subscription OnCreateNote {
  onCreateNote {
    id
    note
  }
}";

/// Notification: a note was updated.
pub const ON_UPDATE_NOTE: &str = "\
subscription OnUpdateNote {
  onUpdateNote {
    id
    note
  }
}";

/// Notification: a note was deleted.
pub const ON_DELETE_NOTE: &str = "\
subscription OnDeleteNote {
  onDeleteNote {
    id
  }
}";

/// Document and operation name for one subscription stream.
pub fn subscription_document(stream: EventStreamKind) -> (&'static str, &'static str) {
    match stream {
        EventStreamKind::Created => (ON_CREATE_NOTE, "OnCreateNote"),
        EventStreamKind::Updated => (ON_UPDATE_NOTE, "OnUpdateNote"),
        EventStreamKind::Deleted => (ON_DELETE_NOTE, "OnDeleteNote"),
    }
}

/// Top-level response field carrying one stream's payload.
pub fn subscription_field(stream: EventStreamKind) -> &'static str {
    match stream {
        EventStreamKind::Created => "onCreateNote",
        EventStreamKind::Updated => "onUpdateNote",
        EventStreamKind::Deleted => "onDeleteNote",
    }
}
