use std::path::PathBuf;
use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config '{field}' must be >= 1.")]
    FieldMustBePositive { field: &'static str },
    #[error("Invalid percentile marker in config: {source}")]
    InvalidPercentile {
        #[source]
        source: ValidationError,
    },
}
