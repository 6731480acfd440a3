use tracing::error;

use crate::error::{BenchError, BenchResult};

use super::{BenchEach, Instrument};

/// Per-step sample buffers and the before/after probe pair over them.
///
/// Owned by the kit; benchmark code reaches it through
/// [`super::BenchKit::each`].
pub struct StepRecorder<I: Instrument> {
    instrument: I,
    pending: Vec<Option<I::Marker>>,
    samples: Vec<Vec<I::Sample>>,
    sealed: bool,
}

impl<I: Instrument> StepRecorder<I> {
    pub(super) fn new(instrument: I, n: usize, hint: usize) -> Self {
        Self {
            instrument,
            pending: (0..n).map(|_| None).collect(),
            samples: (0..n).map(|_| Vec::with_capacity(hint)).collect(),
            sealed: false,
        }
    }

    pub(super) const fn instrument(&self) -> &I {
        &self.instrument
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.samples.len()
    }

    /// Samples recorded so far for step `id`, in recording order.
    #[must_use]
    pub fn recorded(&self, id: usize) -> Option<&[I::Sample]> {
        self.samples.get(id).map(Vec::as_slice)
    }

    pub(super) fn pending_ids(&self) -> Vec<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter_map(|(id, marker)| marker.as_ref().map(|_| id))
            .collect()
    }

    /// Stop accepting probes and hand over every step's samples.
    pub(super) fn seal(&mut self) -> Vec<Vec<I::Sample>> {
        self.sealed = true;
        self.pending.iter_mut().for_each(|marker| *marker = None);
        self.samples.iter_mut().map(std::mem::take).collect()
    }

    fn ensure_open(&self) -> BenchResult<()> {
        if self.sealed {
            return Err(BenchError::InvalidState {
                operation: "probe",
                state: "torn down",
            });
        }
        Ok(())
    }

    fn domain_error(&self, id: usize) -> BenchError {
        let n = self.n();
        error!("step id {} outside [0, {})", id, n);
        BenchError::Domain { id, n }
    }
}

impl<I: Instrument> BenchEach for StepRecorder<I> {
    fn before(&mut self, id: usize) -> BenchResult<()> {
        self.ensure_open()?;
        if id >= self.pending.len() {
            return Err(self.domain_error(id));
        }
        let marker = self.instrument.mark();
        if let Some(slot) = self.pending.get_mut(id) {
            *slot = Some(marker);
        }
        Ok(())
    }

    fn after(&mut self, id: usize) -> BenchResult<()> {
        self.ensure_open()?;
        let Some(slot) = self.pending.get_mut(id) else {
            return Err(self.domain_error(id));
        };
        let Some(marker) = slot.take() else {
            error!("After({}) without a pending Before({})", id, id);
            return Err(BenchError::Sequencing { id });
        };
        let sample = self.instrument.complete(marker);
        if let Some(bucket) = self.samples.get_mut(id) {
            bucket.push(sample);
        }
        Ok(())
    }
}
