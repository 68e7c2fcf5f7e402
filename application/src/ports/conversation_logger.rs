//! Port for structured transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording council events
//! (agent evaluations, deliberation rounds, adjudications, synthesis) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the council
//! transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured council event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "agent_evaluation", "deliberation_round").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging council events to a structured log.
///
/// `log` is synchronous and infallible; adapters swallow write failures so
/// a broken transcript never interrupts a council run.
pub trait ConversationLogger: Send + Sync {
    /// Record a council event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
