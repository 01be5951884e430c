use std::time::Duration;

///
/// QueryPolicy
///
/// Execution-layer knobs for one query/scan request, passed alongside the
/// statement. Like the statement it is a plain value carrier: nothing is
/// validated here, and the execution layer owns the interpretation of
/// every field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryPolicy {
    /// Total request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Bound on records buffered ahead of the consumer.
    pub record_queue_size: usize,

    /// Abort the request when cluster membership changes mid-stream.
    pub fail_on_cluster_change: bool,
}

impl QueryPolicy {
    /// Create a policy with the default knobs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            record_queue_size: 5000,
            fail_on_cluster_change: false,
        }
    }
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
