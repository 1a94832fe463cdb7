//! # notewire-core
//!
//! Core types, traits, and abstractions for the notewire client.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other notewire crates depend on: the note model, the normalized
//! event model for the three remote subscription streams, the shared error
//! type, and the `NotesBackend` seam the transport layer implements.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{EventEnvelope, EventStreamKind, NoteEvent};
pub use models::*;
pub use traits::*;
