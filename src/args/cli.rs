use clap::{Parser, Subcommand};

use super::parsers::{parse_percentile, parse_positive_u64, parse_positive_usize};
use super::types::{PositiveU64, PositiveUsize};
use crate::stats::Percentile;

#[derive(Debug, Subcommand, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Time steps that sleep 1x, 2x, ... the base step duration
    Time,
    /// Track memory while each step appends a fixed-size buffer to an archive
    Memory,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Lightweight benchmark kit - per-step timing and memory probes reduced to trimmed order statistics."
)]
pub struct BenchArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (.toml or .json)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Number of steps (distinct units of work)
    #[arg(long = "steps", short = 'n', global = true, value_parser = parse_positive_usize)]
    pub steps: Option<PositiveUsize>,

    /// Repetitions of every step
    #[arg(long = "repetitions", short = 'm', global = true, value_parser = parse_positive_usize)]
    pub repetitions: Option<PositiveUsize>,

    /// Base sleep of the time workload in milliseconds
    #[arg(long = "step-ms", global = true, value_parser = parse_positive_u64)]
    pub step_ms: Option<PositiveU64>,

    /// Buffer size of the memory workload in bytes
    #[arg(long = "alloc-bytes", global = true, value_parser = parse_positive_usize)]
    pub alloc_bytes: Option<PositiveUsize>,

    /// Percentile marker on the 0-100 scale (repeatable, e.g. 50, 99.9)
    #[arg(long = "percentile", short = 'p', global = true, value_parser = parse_percentile)]
    pub percentiles: Vec<Percentile>,

    /// Directory charts are written to
    #[arg(long = "charts-path", global = true)]
    pub charts_path: Option<String>,

    /// Do not write charts
    #[arg(long = "no-charts", global = true)]
    pub no_charts: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", env = "NO_COLOR", global = true)]
    pub no_color: bool,
}
