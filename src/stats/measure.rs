/// Arithmetic a sample type must support so the engine can average it.
///
/// Implemented for scalar durations and for the composite memory vector, so
/// mean and standard deviation share one code path for both kits.
pub trait Measure: Clone + Default {
    type Key: Ord;

    /// Sum of squared deviations, kept in a wider type than the sample so
    /// large spreads do not saturate before the square root.
    type Squares: Default;

    /// Scalar used to order samples.
    fn sort_key(&self) -> Self::Key;

    fn accumulate(&self, other: &Self) -> Self;

    /// Divide by a sample count. A zero count yields the zero value.
    fn scaled_down(&self, count: u64) -> Self;

    /// Add the squared distance between `self` and `mean` to `squares`.
    fn add_squared_deviation(&self, mean: &Self, squares: Self::Squares) -> Self::Squares;

    /// Square root of `squares / count`. A zero count yields the zero value.
    fn root_mean(squares: &Self::Squares, count: u64) -> Self;

    #[must_use]
    fn mean(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let sum = samples
            .iter()
            .fold(Self::default(), |acc, sample| acc.accumulate(sample));
        sum.scaled_down(samples.len() as u64)
    }

    /// Population standard deviation around `mean`.
    #[must_use]
    fn std_dev(samples: &[Self], mean: &Self) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let squares = samples
            .iter()
            .fold(Self::Squares::default(), |acc, sample| {
                sample.add_squared_deviation(mean, acc)
            });
        Self::root_mean(&squares, samples.len() as u64)
    }
}

/// Widened square of the distance between two counters.
#[must_use]
pub(crate) fn squared_distance(left: u128, right: u128) -> u128 {
    let distance = left.abs_diff(right);
    distance.saturating_mul(distance)
}

/// `isqrt(squares / count)`, zero for a zero count.
#[must_use]
pub(crate) fn root_of_mean(squares: u128, count: u64) -> u128 {
    squares
        .checked_div(u128::from(count))
        .unwrap_or(0)
        .isqrt()
}
