use std::path::PathBuf;

use clap::Parser;
use tempfile::tempdir;

use super::{load_config_file, resolve_settings, types::ConfigFile};
use crate::args::{BenchArgs, Command, DEFAULT_REPETITIONS};
use crate::error::{AppError, ConfigError};
use crate::stats::Percentile;

fn args(raw: &[&str]) -> Result<BenchArgs, String> {
    BenchArgs::try_parse_from(raw).map_err(|err| err.to_string())
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("benchkit.toml");
    let content = r#"
steps = 5
repetitions = 40
step_ms = 3
percentiles = ["50", "99.9"]
charts_path = "out/charts"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    assert_eq!(config.steps, Some(5));
    assert_eq!(config.repetitions, Some(40));
    assert_eq!(config.step_ms, Some(3));
    assert_eq!(
        config.percentiles,
        Some(vec!["50".to_owned(), "99.9".to_owned()])
    );
    assert_eq!(config.charts_path.as_deref(), Some("out/charts"));
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("benchkit.json");
    std::fs::write(&path, r#"{"alloc_bytes": 4096, "no_charts": true}"#)
        .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    assert_eq!(config.alloc_bytes, Some(4096));
    assert_eq!(config.no_charts, Some(true));
    assert_eq!(config.steps, None);
    Ok(())
}

#[test]
fn rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("benchkit.yaml");
    std::fs::write(&path, "steps: 1").map_err(|err| format!("write failed: {}", err))?;

    assert!(matches!(
        load_config_file(&path),
        Err(AppError::Config(ConfigError::UnsupportedExtension { .. }))
    ));
    Ok(())
}

#[test]
fn missing_file_is_a_read_error() {
    let path = PathBuf::from("definitely-missing-benchkit.toml");
    assert!(matches!(
        load_config_file(&path),
        Err(AppError::Config(ConfigError::ReadConfig { .. }))
    ));
}

#[test]
fn cli_overrides_config_overrides_defaults() -> Result<(), String> {
    let config = ConfigFile {
        steps: Some(7),
        step_ms: Some(4),
        percentiles: Some(vec!["95".to_owned()]),
        charts_path: Some("from-config".to_owned()),
        ..ConfigFile::default()
    };
    let cli = args(&["benchkit", "time", "-n", "2"])?;

    let settings = resolve_settings(&cli, Some(&config)).map_err(|err| err.to_string())?;
    assert_eq!(settings.command, Command::Time);
    assert_eq!(settings.steps, 2);
    assert_eq!(settings.step_ms, 4);
    assert_eq!(settings.repetitions, DEFAULT_REPETITIONS);
    assert_eq!(settings.percentiles, vec![Percentile::P95]);
    assert_eq!(settings.charts_path, Some(PathBuf::from("from-config")));
    Ok(())
}

#[test]
fn no_charts_from_either_side_disables_charts() -> Result<(), String> {
    let config = ConfigFile {
        no_charts: Some(true),
        ..ConfigFile::default()
    };
    let cli = args(&["benchkit", "memory"])?;
    let settings = resolve_settings(&cli, Some(&config)).map_err(|err| err.to_string())?;
    assert_eq!(settings.charts_path, None);

    let cli = args(&["benchkit", "memory", "--no-charts"])?;
    let settings = resolve_settings(&cli, None).map_err(|err| err.to_string())?;
    assert_eq!(settings.charts_path, None);
    Ok(())
}

#[test]
fn zero_in_config_is_rejected() -> Result<(), String> {
    let config = ConfigFile {
        repetitions: Some(0),
        ..ConfigFile::default()
    };
    let cli = args(&["benchkit", "time"])?;
    assert!(matches!(
        resolve_settings(&cli, Some(&config)),
        Err(AppError::Config(ConfigError::FieldMustBePositive {
            field: "repetitions"
        }))
    ));
    Ok(())
}

#[test]
fn bad_percentile_in_config_is_rejected() -> Result<(), String> {
    let config = ConfigFile {
        percentiles: Some(vec!["0.5".to_owned(), "150".to_owned()]),
        ..ConfigFile::default()
    };
    let cli = args(&["benchkit", "time"])?;
    assert!(matches!(
        resolve_settings(&cli, Some(&config)),
        Err(AppError::Config(ConfigError::InvalidPercentile { .. }))
    ));
    Ok(())
}
