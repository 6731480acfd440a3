mod app;
mod bench;
mod chart;
mod config;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use bench::{BenchError, BenchResult};
pub use chart::ChartError;
pub use config::ConfigError;
pub use validation::ValidationError;
