//! Analytics collaborator.
//!
//! Analytics is strictly fire-and-forget telemetry: components hand a sink
//! an event name and a JSON payload and never look back. Sinks must never
//! panic back into the page behaviors.
//!
//! Transport is out of scope; the provided [`ConsoleSink`] writes structured
//! `tracing` output, and [`MemorySink`] records events for tests.

use parking_lot::Mutex;
use serde_json::Value;

/// A sink for analytics events.
///
/// `record` is infallible by contract; implementations swallow their own
/// failures.
pub trait AnalyticsSink {
    /// Record one event with a structured payload.
    fn record(&self, event: &str, payload: Value);
}

impl<S: AnalyticsSink> AnalyticsSink for std::sync::Arc<S> {
    fn record(&self, event: &str, payload: Value) {
        (**self).record(event, payload);
    }
}

/// A recorded analytics event.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    /// The event name (e.g., `gallery_image_opened`).
    pub name: String,
    /// The structured payload.
    pub payload: Value,
}

/// Sink that logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl AnalyticsSink for ConsoleSink {
    fn record(&self, event: &str, payload: Value) {
        tracing::info!(target: "eggshell::analytics", event, %payload, "analytics event");
    }
}

/// Sink that keeps events in memory, for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of all recorded events, in order.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    /// The recorded event names, in order.
    pub fn names(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.name.clone()).collect()
    }

    /// The number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&self, event: &str, payload: Value) {
        self.events.lock().push(AnalyticsEvent {
            name: event.to_string(),
            payload,
        });
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch, as carried
/// in analytics payloads.
pub fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
