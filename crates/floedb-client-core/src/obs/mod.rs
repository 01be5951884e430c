//! Observability: runtime telemetry for statement activity.
//!
//! This module never reaches into statement internals directly.
//! Query types report through the sink boundary only.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::EventReport;
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
