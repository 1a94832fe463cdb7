//! Remote note events, normalized for the reconciler.
//!
//! The backend delivers three independent subscription streams (created,
//! updated, deleted). The transport layer normalizes their payloads into a
//! single [`NoteEvent`] enum so the reconciler drains one inbound channel
//! instead of wiring three callbacks. Each inbound event is wrapped in an
//! [`EventEnvelope`] carrying arrival metadata for structured logging.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Note, NoteId};

/// The three remote subscription streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStreamKind {
    Created,
    Updated,
    Deleted,
}

impl EventStreamKind {
    /// All streams, in the order they are established.
    pub const ALL: [EventStreamKind; 3] = [
        EventStreamKind::Created,
        EventStreamKind::Updated,
        EventStreamKind::Deleted,
    ];

    /// Short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStreamKind::Created => "created",
            EventStreamKind::Updated => "updated",
            EventStreamKind::Deleted => "deleted",
        }
    }
}

/// A remote state change reported by the backend.
///
/// Serialized with a `type` tag for log/diagnostic output, e.g.
/// `{"type":"Created","id":"...","note":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NoteEvent {
    /// A note was created (possibly echoing a local submission).
    Created(Note),
    /// A note's content changed.
    Updated(Note),
    /// A note was removed.
    Deleted(DeletedRef),
}

/// Payload of a delete event: only the id survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedRef {
    pub id: NoteId,
}

impl NoteEvent {
    pub fn created(note: Note) -> Self {
        NoteEvent::Created(note)
    }

    pub fn updated(note: Note) -> Self {
        NoteEvent::Updated(note)
    }

    pub fn deleted(id: impl Into<NoteId>) -> Self {
        NoteEvent::Deleted(DeletedRef { id: id.into() })
    }

    /// Event type name for logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            NoteEvent::Created(_) => "Created",
            NoteEvent::Updated(_) => "Updated",
            NoteEvent::Deleted(_) => "Deleted",
        }
    }

    /// The id of the note this event concerns.
    pub fn note_id(&self) -> &NoteId {
        match self {
            NoteEvent::Created(note) | NoteEvent::Updated(note) => &note.id,
            NoteEvent::Deleted(gone) => &gone.id,
        }
    }
}

/// Inbound event plus arrival metadata.
///
/// `received_at` is stamped when the transport hands the event over, so the
/// reconciliation window (arrival to apply) shows up in the logs.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub received_at: DateTime<Utc>,
    pub stream: EventStreamKind,
    pub event: NoteEvent,
}

impl EventEnvelope {
    /// Wrap an event arriving on the given stream, stamped with now.
    pub fn new(stream: EventStreamKind, event: NoteEvent) -> Self {
        Self {
            received_at: Utc::now(),
            stream,
            event,
        }
    }
}
