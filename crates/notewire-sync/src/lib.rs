//! # notewire-sync
//!
//! The reconciler keeping a local note collection consistent with the
//! managed backend.
//!
//! [`NoteCollection`] is the pure core: an ordered, id-keyed list with one
//! invariant (id uniqueness) mutated only through [`NoteCollection::apply`].
//! [`NotesSession`] wires it to a [`NotesBackend`](notewire_core::NotesBackend):
//! full fetch on startup, mutations submitted without local insertion, and a
//! single inbound channel fed by the three remote event streams.
//!
//! ## Example
//!
//! ```ignore
//! use notewire_sync::NotesSession;
//!
//! let mut session = NotesSession::new(backend);
//! session.load_all().await?;
//!
//! let (subscriptions, mut events) = session.subscribe().await?;
//! while let Some(envelope) = events.recv().await {
//!     session.apply_event(envelope);
//! }
//! subscriptions.shutdown().await;
//! ```

pub mod reconciler;
pub mod session;

pub use reconciler::{Applied, NoteCollection};
pub use session::{NotesSession, SubscriptionSet};
