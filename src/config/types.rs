use std::path::PathBuf;

use serde::Deserialize;

use crate::args::Command;
use crate::stats::Percentile;

/// Contents of `benchkit.toml` / `benchkit.json`. Every field is optional;
/// CLI flags take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub steps: Option<usize>,
    pub repetitions: Option<usize>,
    pub step_ms: Option<u64>,
    pub alloc_bytes: Option<usize>,
    pub percentiles: Option<Vec<String>>,
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub command: Command,
    pub steps: usize,
    pub repetitions: usize,
    pub step_ms: u64,
    pub alloc_bytes: usize,
    pub percentiles: Vec<Percentile>,
    /// `None` when charts are disabled.
    pub charts_path: Option<PathBuf>,
    pub verbose: bool,
    pub no_color: bool,
}
