use thiserror::Error;

use super::{BenchError, ChartError, ConfigError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Benchmark error: {0}")]
    Bench(#[from] BenchError),
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }
}
