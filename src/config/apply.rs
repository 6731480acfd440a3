use std::path::PathBuf;

use crate::args::{
    BenchArgs, DEFAULT_ALLOC_BYTES, DEFAULT_REPETITIONS, DEFAULT_STEP_MS, DEFAULT_STEPS,
    PositiveU64, PositiveUsize, default_charts_path, default_percentiles,
};
use crate::error::{AppError, AppResult, ConfigError};
use crate::stats::Percentile;

use super::types::{ConfigFile, RunSettings};

/// Merge CLI arguments over config values over defaults.
///
/// # Errors
///
/// Returns an error when a config value is zero where a positive number is
/// required, or a configured percentile marker does not parse.
pub fn resolve_settings(args: &BenchArgs, config: Option<&ConfigFile>) -> AppResult<RunSettings> {
    let empty = ConfigFile::default();
    let config = config.unwrap_or(&empty);

    let steps = match args.steps {
        Some(steps) => steps.get(),
        None => positive_usize(config.steps, "steps")?.unwrap_or(DEFAULT_STEPS),
    };
    let repetitions = match args.repetitions {
        Some(repetitions) => repetitions.get(),
        None => positive_usize(config.repetitions, "repetitions")?.unwrap_or(DEFAULT_REPETITIONS),
    };
    let step_ms = match args.step_ms {
        Some(step_ms) => step_ms.get(),
        None => positive_u64(config.step_ms, "step_ms")?.unwrap_or(DEFAULT_STEP_MS),
    };
    let alloc_bytes = match args.alloc_bytes {
        Some(bytes) => bytes.get(),
        None => positive_usize(config.alloc_bytes, "alloc_bytes")?.unwrap_or(DEFAULT_ALLOC_BYTES),
    };

    let percentiles = if !args.percentiles.is_empty() {
        args.percentiles.clone()
    } else if let Some(markers) = config.percentiles.as_ref() {
        parse_markers(markers)?
    } else {
        default_percentiles()
    };

    let no_charts = args.no_charts || config.no_charts.unwrap_or(false);
    let charts_path = (!no_charts).then(|| {
        PathBuf::from(
            args.charts_path
                .clone()
                .or_else(|| config.charts_path.clone())
                .unwrap_or_else(default_charts_path),
        )
    });

    Ok(RunSettings {
        command: args.command,
        steps,
        repetitions,
        step_ms,
        alloc_bytes,
        percentiles,
        charts_path,
        verbose: args.verbose || config.verbose.unwrap_or(false),
        no_color: args.no_color || config.no_color.unwrap_or(false),
    })
}

fn positive_usize(value: Option<usize>, field: &'static str) -> AppResult<Option<usize>> {
    value
        .map(|value| {
            PositiveUsize::try_from(value)
                .map(PositiveUsize::get)
                .map_err(|_err| AppError::config(ConfigError::FieldMustBePositive { field }))
        })
        .transpose()
}

fn positive_u64(value: Option<u64>, field: &'static str) -> AppResult<Option<u64>> {
    value
        .map(|value| {
            PositiveU64::try_from(value)
                .map(PositiveU64::get)
                .map_err(|_err| AppError::config(ConfigError::FieldMustBePositive { field }))
        })
        .transpose()
}

fn parse_markers(markers: &[String]) -> AppResult<Vec<Percentile>> {
    markers
        .iter()
        .map(|marker| {
            marker
                .parse::<Percentile>()
                .map_err(|err| AppError::config(ConfigError::InvalidPercentile { source: err }))
        })
        .collect()
}
