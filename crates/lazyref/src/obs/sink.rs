//! Metrics sink boundary.
//!
//! The proxy records through `record`; `MetricsSink` is the only bridge
//! between reference logic and the global metrics state.

use crate::obs::metrics;
use std::{cell::RefCell, sync::Arc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Arc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    /// A store lookup ran and produced an instance.
    ResolveOk { entity_path: &'static str },
    /// A store lookup ran and failed; the failure is now remembered.
    ResolveFail {
        entity_path: &'static str,
        not_found: bool,
    },
    /// An accessor was served from an existing terminal state.
    StateHit { entity_path: &'static str },
    /// The reference was pushed back to unloaded.
    Invalidate { entity_path: &'static str },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| m.apply(event));
    }
}

///
/// NullMetricsSink
/// Discards every event; for scopes that must not touch global state.
///

pub struct NullMetricsSink;

impl MetricsSink for NullMetricsSink {
    fn record(&self, _: MetricsEvent) {}
}

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    if let Some(sink) = override_sink {
        sink.record(event);
    } else {
        GlobalMetricsSink.record(event);
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The override applies to the calling thread only: events recorded by
/// other threads keep flowing to the global sink. The previous override is
/// restored on every exit path, including unwind.
pub fn with_metrics_sink<T>(sink: Arc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Arc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = self.0.take());
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
