use chrono::Utc;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::{LazyLock, Mutex};

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state so ids stay strictly increasing across threads
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::default()));

///
/// TaskId
/// Caller-visible correlation token for a single logical request.
/// Zero is the "unassigned" sentinel; `Statement::prepare` replaces it
/// with a generated id unless the caller assigned one explicitly.
///

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw caller-chosen id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Return the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True while the zero sentinel has not been replaced.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }

    /// Draw a fresh id from the global monotonic generator.
    #[must_use]
    pub fn next() -> Self {
        let mut generator = GENERATOR.lock().expect("task id generator mutex poisoned");

        Self(generator.generate())
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

///
/// Generator
///
/// Monotonic task-id generation seeded from the wall clock in nanoseconds.
/// When the clock does not advance past the previous id (same reading, or
/// time went backward), the previous id is incremented instead, so ids are
/// strictly increasing and never return to the zero sentinel.
///

#[derive(Default)]
struct Generator {
    previous: u64,
}

impl Generator {
    fn generate(&mut self) -> u64 {
        let now = clock_nanos();

        let id = if now <= self.previous {
            self.previous.saturating_add(1)
        } else {
            now
        };
        self.previous = id;

        id
    }
}

/// Wall-clock nanoseconds since the Unix epoch, clamped to `u64`.
#[allow(clippy::cast_sign_loss)]
fn clock_nanos() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(u64::MAX, |ns| if ns < 0 { 0 } else { ns as u64 })
}

///
/// TESTS
///
