//! Core data models for notewire.
//!
//! These types mirror the managed backend's GraphQL contract: a `Note` is a
//! text record with a backend-assigned opaque identifier. The wire field for
//! the content is named `note` (the backend schema's field name); the Rust
//! field is `text`.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// Opaque note identifier assigned by the backend on creation.
///
/// The client never parses or fabricates one of these: until the create
/// response or echoed create event arrives, a submitted note has no identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// View the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user-authored text record with a backend-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Note content. Serialized as `note` to match the backend schema.
    #[serde(rename = "note")]
    pub text: String,
}

impl Note {
    pub fn new(id: impl Into<NoteId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

// =============================================================================
// REQUEST / RESPONSE SHAPES
// =============================================================================

/// Input for the `createNote` mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteInput {
    #[serde(rename = "note")]
    pub text: String,
}

/// Input for the `updateNote` mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    pub id: NoteId,
    #[serde(rename = "note")]
    pub text: String,
}

/// Input for the `deleteNote` mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNoteInput {
    pub id: NoteId,
}

/// Page returned by the `listNotes` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotesPage {
    pub items: Vec<Note>,
}

/// Acknowledgment returned by the `deleteNote` mutation and delete events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedNote {
    pub id: NoteId,
}
