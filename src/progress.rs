//! Progress snapshots and deadline budget.
//!
//! The observer contract (spec §4.4/§5/§9): non-blocking, lossy for
//! intermediate snapshots, lossless for the final one. [`LatchSink`]
//! is a mutex-guarded single slot — whichever snapshot arrives last
//! wins, satisfying "coalesce to the latest" without the solver ever
//! blocking on a slow consumer.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

/// One point-in-time view of a running search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub nodes: u64,
    #[serde(rename = "UB")]
    pub ub: usize,
    #[serde(rename = "LB")]
    pub lb: usize,
    pub elapsed: f64,
    pub cuts: u64,
    pub done: bool,
}

/// Non-blocking observer of B&B progress. Implementors must not do
/// anything that can stall the caller — `post` runs on the search's
/// hot path.
pub trait ProgressSink: Send + Sync {
    fn post(&self, snapshot: Snapshot);
}

/// A no-op sink, for callers that do not want live progress.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn post(&self, _snapshot: Snapshot) {}
}

/// Single-slot overwrite latch: concurrent producers (one per engine)
/// may each hold one, a consumer polls at its own cadence and always
/// sees the most recent snapshot posted so far.
#[derive(Debug, Default)]
pub struct LatchSink {
    latest: Mutex<Option<Snapshot>>,
}

impl LatchSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest snapshot without clearing it.
    pub fn peek(&self) -> Option<Snapshot> {
        *self.latest.lock().unwrap()
    }

    /// Returns and clears the latest snapshot.
    pub fn take(&self) -> Option<Snapshot> {
        self.latest.lock().unwrap().take()
    }
}

impl ProgressSink for LatchSink {
    fn post(&self, snapshot: Snapshot) {
        *self.latest.lock().unwrap() = Some(snapshot);
    }
}

/// Monotone wall-clock budget for a single solve call.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn from_secs(seconds: f64) -> Self {
        Self { start: Instant::now(), limit: Duration::from_secs_f64(seconds.max(0.0)) }
    }

    /// A deadline that has already passed — models an external cancel
    /// signal (spec §5: "setting the deadline to now").
    pub fn expired_now() -> Self {
        Self { start: Instant::now(), limit: Duration::ZERO }
    }

    /// Cheap check, safe to call at every B&B node.
    pub fn expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
