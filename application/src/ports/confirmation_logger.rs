//! Port for structured confirmation event logging.
//!
//! Defines the [`ConfirmationLogger`] trait for recording every decision a
//! confirmation run makes (sends, outcomes, restarts, pruning) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! run transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Event emitted once a model is selected and the walk begins
pub const RUN_STARTED: &str = "run_started";
/// Event emitted when the walk stops without error
pub const RUN_FINISHED: &str = "run_finished";
/// Event emitted when the run aborts with an error
pub const RUN_FAILED: &str = "run_failed";

/// A structured confirmation event for logging.
pub struct ConfirmationEvent {
    /// Event type identifier (e.g., "proposal_sent", "restart", "run_finished").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConfirmationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Whether this event opens a run
    pub fn is_run_start(&self) -> bool {
        self.event_type == RUN_STARTED
    }

    /// Whether this is the last event of a run
    pub fn is_terminal(&self) -> bool {
        matches!(self.event_type, RUN_FINISHED | RUN_FAILED)
    }
}

/// Port for logging confirmation events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that logging
/// failures never affect the run.
pub trait ConfirmationLogger: Send + Sync {
    /// Record a confirmation event.
    fn log(&self, event: ConfirmationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConfirmationLogger;

impl ConfirmationLogger for NoConfirmationLogger {
    fn log(&self, _event: ConfirmationEvent) {}
}
