use std::time::{Duration, Instant};

use crate::result::{ResultHandle, TimeResult};

use super::{Instrument, Kit};

/// Monotonic clock instrument: samples are elapsed wall time.
#[derive(Debug, Default, Clone, Copy)]
pub struct Clock;

impl Instrument for Clock {
    type Baseline = Instant;
    type Marker = Instant;
    type Sample = Duration;

    fn baseline(&self) -> Instant {
        Instant::now()
    }

    fn mark(&self) -> Instant {
        Instant::now()
    }

    fn complete(&self, marker: Instant) -> Duration {
        marker.elapsed()
    }
}

pub type TimeKit = Kit<Clock>;

/// Time `n` steps, preallocating room for `m` repetitions of each.
#[must_use]
pub fn time(n: usize, m: usize) -> (TimeKit, ResultHandle<TimeResult>) {
    Kit::new(Clock, n, m)
}
