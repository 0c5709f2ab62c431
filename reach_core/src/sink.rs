//! Injected event sink for warnings and faults.
//!
//! The core reports every degradation and fault through this capability so a
//! deployment can mirror them into its own safety channel. Correctness never
//! depends on the sink; the default forwards to `tracing`.

use crate::error::ReachError;

/// Receiver for warning/error events raised inside the monitor.
pub trait EventSink: Send + Sync {
    fn warning(&self, event: &ReachError);
    fn error(&self, event: &ReachError);
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn warning(&self, event: &ReachError) {
        tracing::warn!(%event, "reachability degraded");
    }

    fn error(&self, event: &ReachError) {
        tracing::error!(%event, "reachability fault");
    }
}

/// Sink that drops every event. Useful in benchmarks and tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn warning(&self, _event: &ReachError) {}
    fn error(&self, _event: &ReachError) {}
}
