use std::time::Duration;

use super::Measure;
use super::measure::{root_of_mean, squared_distance};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Convert a nanosecond count to a `Duration`, saturating at `Duration::MAX`.
fn duration_from_nanos(nanos: u128) -> Duration {
    let secs = nanos.checked_div(NANOS_PER_SEC).unwrap_or(0);
    let subsec = nanos.checked_rem(NANOS_PER_SEC).unwrap_or(0);
    match (u64::try_from(secs), u32::try_from(subsec)) {
        (Ok(secs), Ok(subsec)) => Duration::new(secs, subsec),
        (Err(_), _) | (_, Err(_)) => Duration::MAX,
    }
}

impl Measure for Duration {
    type Key = Duration;
    /// Squared nanoseconds.
    type Squares = u128;

    fn sort_key(&self) -> Self::Key {
        *self
    }

    fn accumulate(&self, other: &Self) -> Self {
        self.saturating_add(*other)
    }

    fn scaled_down(&self, count: u64) -> Self {
        duration_from_nanos(
            self.as_nanos()
                .checked_div(u128::from(count))
                .unwrap_or(0),
        )
    }

    fn add_squared_deviation(&self, mean: &Self, squares: u128) -> u128 {
        squares.saturating_add(squared_distance(self.as_nanos(), mean.as_nanos()))
    }

    fn root_mean(squares: &u128, count: u64) -> Self {
        duration_from_nanos(root_of_mean(*squares, count))
    }
}
