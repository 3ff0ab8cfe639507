//! Observability: resolution telemetry and sink abstractions.
//!
//! Reference logic does not touch `obs::metrics` directly; all
//! instrumentation flows through `MetricsEvent` and `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, NullMetricsSink, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
