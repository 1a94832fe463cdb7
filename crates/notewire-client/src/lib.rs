//! # notewire-client
//!
//! GraphQL backend client for notewire.
//!
//! This crate speaks the managed backend's contract: four request shapes
//! (list/create/update/delete) issued as GraphQL-over-HTTP POSTs, and three
//! long-lived subscription streams consumed over SSE. It implements the
//! [`NotesBackend`](notewire_core::NotesBackend) seam defined in
//! `notewire-core`.
//!
//! ## Example
//!
//! ```ignore
//! use notewire_client::{BackendConfig, GraphqlNotesClient};
//! use notewire_core::{CreateNoteInput, EventStreamKind, NotesBackend};
//!
//! let config = BackendConfig::from_env()?;
//! let client = GraphqlNotesClient::new(&config)?;
//!
//! let notes = client.list_notes().await?;
//! let created = client
//!     .create_note(CreateNoteInput { text: "hello".into() })
//!     .await?;
//!
//! let mut events = client.subscribe(EventStreamKind::Created).await?;
//! ```

pub mod client;
pub mod config;
pub mod documents;
pub mod subscription;
pub mod wire;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::GraphqlNotesClient;
pub use config::BackendConfig;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockNotesBackend;
