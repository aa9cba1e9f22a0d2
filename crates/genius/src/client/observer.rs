//! Call observation for reporting progress through one orchestrator call.

use crate::model::{CallId, EndpointKind, OutcomeKind};

/// Stage transition within a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    /// Request handed to the transport.
    Sent {
        /// Call identifier.
        call_id: CallId,
        /// Endpoint being called.
        endpoint: EndpointKind,
    },
    /// A response arrived.
    Received {
        /// Call identifier.
        call_id: CallId,
        /// HTTP status code.
        status: u16,
    },
    /// The body parsed as structured data.
    Decoded {
        /// Call identifier.
        call_id: CallId,
    },
    /// The payload was resolved to a result record.
    Normalized {
        /// Call identifier.
        call_id: CallId,
        /// Whether a `reports` envelope was unwrapped.
        unwrapped: bool,
    },
    /// The call reached a terminal state.
    Finished {
        /// Call identifier.
        call_id: CallId,
        /// Terminal outcome.
        outcome: OutcomeKind,
        /// Wall-clock duration in milliseconds.
        duration_ms: u64,
    },
}

/// Receives [`CallEvent`]s as a call advances.
pub trait CallObserver: Send + Sync {
    fn on_event(&self, event: &CallEvent);
}

/// Observer that discards all events.
pub struct NoopObserver;

impl CallObserver for NoopObserver {
    fn on_event(&self, _event: &CallEvent) {}
}

/// Observer that collects events for testing.
#[cfg(test)]
#[derive(Default)]
pub struct CollectingObserver {
    events: std::sync::Mutex<Vec<CallEvent>>,
}

#[cfg(test)]
impl CollectingObserver {
    /// # Panics
    /// Panics if the mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn events(&self) -> Vec<CallEvent> {
        self.events.lock().expect("observer mutex poisoned").clone()
    }
}

#[cfg(test)]
impl CallObserver for CollectingObserver {
    #[allow(clippy::expect_used)]
    fn on_event(&self, event: &CallEvent) {
        self.events
            .lock()
            .expect("observer mutex poisoned")
            .push(event.clone());
    }
}
