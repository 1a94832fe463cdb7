//! Structured logging field name constants for notewire.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log tooling can query by standardized names across the client.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed, user-visible |
//! | WARN  | Recoverable issue (lagged stream, slow request) |
//! | INFO  | Lifecycle events (startup, subscribe, shutdown) |
//! | DEBUG | Per-operation outcomes, applied events |
//! | TRACE | Raw frames and payloads |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID attached to each backend request.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "client", "sync", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "graphql", "subscription", "session", "reconciler"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list_notes", "create_note", "apply_event"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Event stream an inbound event arrived on ("created", "updated", "deleted").
pub const EVENT_STREAM: &str = "event_stream";

/// Inbound event type variant.
pub const EVENT_TYPE: &str = "event_type";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of notes returned or held.
pub const RESULT_COUNT: &str = "result_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
