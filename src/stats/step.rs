use std::ops::Range;

use super::{Measure, Percentile};

/// Percentile band whose samples feed mean and standard deviation.
pub const SIGNIFICANT_BAND: (Percentile, Percentile) = (Percentile::P50, Percentile::P95);

/// Statistics of one step, computed once from its raw samples.
#[derive(Debug, Clone)]
pub struct StepStats<S> {
    all: Vec<S>,
    significant: Range<usize>,
    /// First sample of the significant range.
    pub min: S,
    /// Last sample of the significant range.
    pub max: S,
    pub avg: S,
    pub sd: S,
}

impl<S: Measure> StepStats<S> {
    /// Sort `samples` by their ordering key and derive every statistic.
    ///
    /// An empty input produces a record where every statistic is the zero
    /// value.
    #[must_use]
    pub fn from_samples(mut samples: Vec<S>) -> Self {
        samples.sort_by_key(S::sort_key);
        let (from, to) = SIGNIFICANT_BAND;
        let significant = rank_range(samples.len(), from, to);
        let band = samples.get(significant.clone()).unwrap_or(&[]);
        let min = band.first().cloned().unwrap_or_default();
        let max = band.last().cloned().unwrap_or_default();
        let avg = S::mean(band);
        let sd = S::std_dev(band, &avg);
        Self {
            all: samples,
            significant,
            min,
            max,
            avg,
            sd,
        }
    }

    /// Sample at percentile `k`, or the zero value for an empty step.
    #[must_use]
    pub fn p(&self, k: Percentile) -> S {
        k.rank(self.all.len())
            .checked_sub(1)
            .and_then(|idx| self.all.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    /// Sorted samples between the ranks of `from` and `to`, inclusive.
    ///
    /// Empty when the step has no samples or `from` ranks above `to`.
    #[must_use]
    pub fn p_range(&self, from: Percentile, to: Percentile) -> &[S] {
        self.all
            .get(rank_range(self.all.len(), from, to))
            .unwrap_or(&[])
    }
}

impl<S> StepStats<S> {
    /// Every recorded sample, sorted.
    #[must_use]
    pub fn all(&self) -> &[S] {
        &self.all
    }

    /// The 50th–95th percentile band used for mean and standard deviation.
    #[must_use]
    pub fn significant(&self) -> &[S] {
        self.all.get(self.significant.clone()).unwrap_or(&[])
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.all.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

fn rank_range(count: usize, from: Percentile, to: Percentile) -> Range<usize> {
    let start = from.rank(count).saturating_sub(1);
    let end = to.rank(count);
    if start >= end {
        return start..start;
    }
    start..end
}
