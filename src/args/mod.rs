//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{BenchArgs, Command};
pub use defaults::{
    DEFAULT_ALLOC_BYTES, DEFAULT_REPETITIONS, DEFAULT_STEP_MS, DEFAULT_STEPS, default_charts_path,
    default_percentiles,
};
pub use types::{PositiveU64, PositiveUsize};
