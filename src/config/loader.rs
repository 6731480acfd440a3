use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Config files picked up from the working directory when `--config` is not
/// given, in order of preference.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["benchkit.toml", "benchkit.json"];

/// Loads a configuration file from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return Ok(Some(load_config_file(Path::new(path))?));
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return Ok(Some(load_config_file(&candidate)?));
        }
    }

    Ok(None)
}

/// Reads and parses one config file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, fails to parse, or has an
/// unsupported extension.
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
