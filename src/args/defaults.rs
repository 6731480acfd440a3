use crate::stats::Percentile;

pub const DEFAULT_STEPS: usize = 3;
pub const DEFAULT_REPETITIONS: usize = 10;
pub const DEFAULT_STEP_MS: u64 = 1;
pub const DEFAULT_ALLOC_BYTES: usize = 1_000_000;

#[must_use]
pub fn default_charts_path() -> String {
    "./charts".to_owned()
}

#[must_use]
pub fn default_percentiles() -> Vec<Percentile> {
    vec![Percentile::P50, Percentile::P90, Percentile::P99]
}
