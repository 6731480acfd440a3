//! Instrumentation kits: lifecycle, per-step probes and teardown.
//!
//! A kit is built together with an empty [`ResultHandle`]. The caller drives
//! it through `setup -> starting -> before/after pairs -> teardown`, and only
//! after teardown does the handle hold a result.
mod memory;
mod recorder;
mod time;


use tracing::{debug, trace, warn};

use crate::error::{BenchError, BenchResult};
use crate::result::{KitReport, ResultHandle};
use crate::stats::{Measure, StepStats};

pub use memory::{MemKit, MemoryProbe, memory, memory_with_hint, memory_with_source};
pub use recorder::StepRecorder;
pub use time::{Clock, TimeKit, time};

/// Lifecycle surface of a kit, as seen by benchmark code.
pub trait BenchKit {
    type Each: BenchEach;

    /// Record the cold baseline. Call before allocating benchmark fixtures.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the kit is freshly created.
    fn setup(&mut self) -> BenchResult<()>;

    /// Record the warm baseline, once fixtures are ready.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless `setup` was the previous call.
    fn starting(&mut self) -> BenchResult<()>;

    /// The prober bound to this kit. Every call returns the same prober.
    fn each(&mut self) -> &mut Self::Each;

    /// Record the final baseline, reduce every step and publish the result.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the kit has been started.
    fn teardown(&mut self) -> BenchResult<()>;
}

/// Probe pair wrapped around one unit of work.
pub trait BenchEach {
    /// Mark the start of a unit of work for step `id`. A second `before`
    /// without an `after` replaces the first mark.
    ///
    /// # Errors
    ///
    /// Returns a domain error when `id` is outside the kit's steps.
    fn before(&mut self, id: usize) -> BenchResult<()>;

    /// Close the unit of work opened by the last `before(id)` and record a
    /// sample for step `id`.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an unknown `id` and a sequencing error when
    /// no `before(id)` is pending.
    fn after(&mut self, id: usize) -> BenchResult<()>;
}

/// What a kit measures: how baselines, start marks and samples are taken.
pub trait Instrument {
    type Baseline;
    type Marker;
    type Sample: Measure;

    fn baseline(&self) -> Self::Baseline;

    fn mark(&self) -> Self::Marker;

    /// Turn the mark taken by `before` into the sample recorded by `after`.
    fn complete(&self, marker: Self::Marker) -> Self::Sample;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitState {
    Created,
    SetupDone,
    Started,
    TornDown,
}

impl KitState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KitState::Created => "created",
            KitState::SetupDone => "set up",
            KitState::Started => "started",
            KitState::TornDown => "torn down",
        }
    }
}

/// Kit generic over its instrument. See [`time`] and [`memory`].
pub struct Kit<I: Instrument> {
    state: KitState,
    setup: Option<I::Baseline>,
    start: Option<I::Baseline>,
    recorder: StepRecorder<I>,
    results: ResultHandle<KitReport<I::Baseline, I::Sample>>,
}

impl<I: Instrument> Kit<I> {
    /// Build a kit for `n` steps with room for `hint` samples per step.
    ///
    /// The hint only sizes buffers; recording fewer or more samples is fine.
    #[must_use]
    pub fn new(
        instrument: I,
        n: usize,
        hint: usize,
    ) -> (Self, ResultHandle<KitReport<I::Baseline, I::Sample>>) {
        let results = ResultHandle::new();
        let kit = Self {
            state: KitState::Created,
            setup: None,
            start: None,
            recorder: StepRecorder::new(instrument, n, hint),
            results: results.clone(),
        };
        (kit, results)
    }

    #[must_use]
    pub const fn state(&self) -> KitState {
        self.state
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.recorder.n()
    }

    fn transition(
        &mut self,
        operation: &'static str,
        from: KitState,
        to: KitState,
    ) -> BenchResult<()> {
        if self.state != from {
            return Err(BenchError::InvalidState {
                operation,
                state: self.state.name(),
            });
        }
        debug!("kit {} -> {}", self.state.name(), to.name());
        self.state = to;
        Ok(())
    }
}

impl<I: Instrument> BenchKit for Kit<I> {
    type Each = StepRecorder<I>;

    fn setup(&mut self) -> BenchResult<()> {
        self.transition("set up", KitState::Created, KitState::SetupDone)?;
        self.setup = Some(self.recorder.instrument().baseline());
        Ok(())
    }

    fn starting(&mut self) -> BenchResult<()> {
        self.transition("start", KitState::SetupDone, KitState::Started)?;
        self.start = Some(self.recorder.instrument().baseline());
        Ok(())
    }

    fn each(&mut self) -> &mut Self::Each {
        &mut self.recorder
    }

    fn teardown(&mut self) -> BenchResult<()> {
        self.transition("tear down", KitState::Started, KitState::TornDown)?;
        let teardown = self.recorder.instrument().baseline();

        let unmatched = self.recorder.pending_ids();
        if !unmatched.is_empty() {
            warn!("steps {:?} have a Before without an After", unmatched);
        }

        let n = self.recorder.n();
        let each: Vec<StepStats<I::Sample>> = self
            .recorder
            .seal()
            .into_iter()
            .enumerate()
            .map(|(id, samples)| {
                trace!("finalizing step {} with {} samples", id, samples.len());
                StepStats::from_samples(samples)
            })
            .collect();

        let (Some(setup), Some(start)) = (self.setup.take(), self.start.take()) else {
            return Err(BenchError::InvalidState {
                operation: "tear down",
                state: "missing baselines",
            });
        };

        let published = self.results.publish(KitReport {
            n,
            setup,
            start,
            teardown,
            each,
        });
        if !published {
            return Err(BenchError::InvalidState {
                operation: "publish results",
                state: KitState::TornDown.name(),
            });
        }
        debug!("kit published results for {} steps", n);
        Ok(())
    }
}

/// Run `work` between `starting` and `teardown`.
///
/// Calls `setup` and `starting` back to back, so fixtures must be built
/// inside `work` or before the kit is created.
///
/// # Errors
///
/// Propagates lifecycle errors and any error returned by `work`.
pub fn bench<K, F>(kit: &mut K, work: F) -> BenchResult<()>
where
    K: BenchKit,
    F: FnOnce(&mut K::Each) -> BenchResult<()>,
{
    kit.setup()?;
    kit.starting()?;
    work(kit.each())?;
    kit.teardown()
}
