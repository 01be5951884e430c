//! Ephemeral, in-memory counters for statement activity.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

thread_local! {
    static STATE: RefCell<EventReport> = RefCell::new(EventReport::default());
}

///
/// EventReport
/// Point-in-time snapshot of the statement counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    // Prepared statements by resolved mode
    pub scans_prepared: u64,
    pub scan_aggregates_prepared: u64,
    pub queries_prepared: u64,
    pub query_aggregates_prepared: u64,

    // Prepared statements that stream record data back
    pub return_data_requests: u64,

    // Task ids drawn from the generator (auto-assignment only)
    pub task_ids_assigned: u64,
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut EventReport) -> T) -> T {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

/// Snapshot the current counters.
#[must_use]
pub fn report() -> EventReport {
    STATE.with(|cell| *cell.borrow())
}

/// Reset all counters.
pub fn reset_all() {
    STATE.with(|cell| *cell.borrow_mut() = EventReport::default());
}
