use crate::mem::{MemStats, MemorySource, ProcessMemory};
use crate::result::{MemResult, ResultHandle};

use super::{Instrument, Kit};

/// Samples are taken without a repetition hint unless one is given.
const DEFAULT_REPETITION_HINT: usize = 0;

/// Memory instrument. `after` stores the absolute snapshot, not a delta
/// against the `before` mark.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryProbe<M = ProcessMemory> {
    source: M,
}

impl<M> MemoryProbe<M> {
    #[must_use]
    pub const fn new(source: M) -> Self {
        Self { source }
    }
}

impl<M: MemorySource> Instrument for MemoryProbe<M> {
    type Baseline = MemStats;
    type Marker = MemStats;
    type Sample = MemStats;

    fn baseline(&self) -> MemStats {
        self.source.snapshot()
    }

    fn mark(&self) -> MemStats {
        self.source.snapshot()
    }

    fn complete(&self, _marker: MemStats) -> MemStats {
        self.source.snapshot()
    }
}

pub type MemKit<M = ProcessMemory> = Kit<MemoryProbe<M>>;

/// Track memory over `n` steps using the process memory source.
#[must_use]
pub fn memory(n: usize) -> (MemKit, ResultHandle<MemResult>) {
    memory_with_hint(n, DEFAULT_REPETITION_HINT)
}

/// Like [`memory`], preallocating room for `m` repetitions per step.
#[must_use]
pub fn memory_with_hint(n: usize, m: usize) -> (MemKit, ResultHandle<MemResult>) {
    memory_with_source(n, m, ProcessMemory)
}

/// Track memory with a custom snapshot source.
#[must_use]
pub fn memory_with_source<M: MemorySource>(
    n: usize,
    m: usize,
    source: M,
) -> (MemKit<M>, ResultHandle<MemResult>) {
    Kit::new(MemoryProbe::new(source), n, m)
}
