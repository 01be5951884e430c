//! Metrics sink boundary.
//!
//! Statement logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between query types and the
//! counter state.

use crate::{obs::metrics, query::mode::QueryMode};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    StatementPrepared { mode: QueryMode, return_data: bool },
    TaskIdAssigned,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::StatementPrepared { mode, return_data } => {
                metrics::with_state_mut(|m| {
                    match mode {
                        QueryMode::Scan => {
                            m.scans_prepared = m.scans_prepared.saturating_add(1);
                        }
                        QueryMode::ScanAggregate => {
                            m.scan_aggregates_prepared = m.scan_aggregates_prepared.saturating_add(1);
                        }
                        QueryMode::Query => {
                            m.queries_prepared = m.queries_prepared.saturating_add(1);
                        }
                        QueryMode::QueryAggregate => {
                            m.query_aggregates_prepared =
                                m.query_aggregates_prepared.saturating_add(1);
                        }
                    }

                    if return_data {
                        m.return_data_requests = m.return_data_requests.saturating_add(1);
                    }
                });
            }

            MetricsEvent::TaskIdAssigned => {
                metrics::with_state_mut(|m| {
                    m.task_ids_assigned = m.task_ids_assigned.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
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
/// The override is scoped to the current thread and restored on all
/// exits, including unwinds.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}
