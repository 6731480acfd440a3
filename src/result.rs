//! Finished benchmark results and the handle they are published through.
use std::sync::Arc;
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;

use crate::error::{BenchError, BenchResult};
use crate::mem::MemStats;
use crate::stats::StepStats;

/// Everything a kit publishes at teardown.
///
/// `B` is the baseline snapshot type taken at each lifecycle boundary and
/// `S` the per-sample type.
#[derive(Debug, Clone)]
pub struct KitReport<B, S> {
    /// Number of steps the kit was built for.
    pub n: usize,
    pub setup: B,
    pub start: B,
    pub teardown: B,
    /// Statistics per step, indexed by step id.
    pub each: Vec<StepStats<S>>,
}

pub type TimeStep = StepStats<Duration>;
pub type MemStep = StepStats<MemStats>;

/// Time kit results: baselines are monotonic instants, samples durations.
pub type TimeResult = KitReport<Instant, Duration>;

/// Memory kit results. Samples are absolute snapshots; subtract `setup` to
/// get per-sample deltas.
pub type MemResult = KitReport<MemStats, MemStats>;

impl<B, S> KitReport<B, S> {
    /// Statistics of step `id`.
    ///
    /// # Errors
    ///
    /// Returns a domain error when `id` is not a step of this result.
    pub fn step(&self, id: usize) -> BenchResult<&StepStats<S>> {
        self.each
            .get(id)
            .ok_or(BenchError::Domain { id, n: self.n })
    }
}

impl TimeResult {
    /// Time between the cold and warm baselines.
    #[must_use]
    pub fn warmup(&self) -> Duration {
        self.start.saturating_duration_since(self.setup)
    }

    /// Time from the warm baseline to teardown.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.teardown.saturating_duration_since(self.start)
    }
}

/// Shared, write-once slot a kit fills at teardown.
///
/// The handle is given out together with the kit, before anything has been
/// measured; reading it before teardown is an `InvalidState` error. Once
/// published the result never changes, so clones may be read from any thread.
#[derive(Debug)]
pub struct ResultHandle<R> {
    slot: Arc<OnceCell<R>>,
}

impl<R> ResultHandle<R> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Arc::new(OnceCell::new()),
        }
    }

    /// The published result.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the owning kit has not been torn down.
    pub fn get(&self) -> BenchResult<&R> {
        self.slot.get().ok_or(BenchError::InvalidState {
            operation: "read results",
            state: "not torn down",
        })
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Publish `value`. Only the first call has any effect.
    pub(crate) fn publish(&self, value: R) -> bool {
        self.slot.set(value).is_ok()
    }
}

impl<R> Clone for ResultHandle<R> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}
