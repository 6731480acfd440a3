//! Statistics engine: reduces a step's raw samples into order statistics.
//!
//! Samples are sorted once, then the central 50th–95th percentile band (the
//! significant range) feeds the mean and standard deviation. Min and max are
//! the edges of that band, so every reported figure describes the same
//! trimmed population.
mod duration;
mod measure;
mod percentile;
mod step;

#[cfg(test)]
mod tests;

pub use measure::Measure;
pub(crate) use measure::{root_of_mean, squared_distance};
pub use percentile::Percentile;
pub use step::{SIGNIFICANT_BAND, StepStats};
