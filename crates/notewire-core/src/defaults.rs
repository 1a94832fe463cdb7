//! Centralized default constants for notewire.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// TRANSPORT
// =============================================================================

/// Timeout for query/mutation requests (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Header used to pass the configured API key to the backend.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Threshold above which a backend call is logged as slow (milliseconds).
pub const SLOW_REQUEST_MS: u64 = 5_000;

// =============================================================================
// EVENTS
// =============================================================================

/// Capacity of the inbound event channel the reconciler drains.
///
/// 256 for production, tests typically use 32.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
