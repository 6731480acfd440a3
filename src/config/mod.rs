//! Configuration loading and application.
mod apply;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::resolve_settings;
pub use loader::{DEFAULT_CONFIG_FILES, load_config, load_config_file};
pub use types::{ConfigFile, RunSettings};
