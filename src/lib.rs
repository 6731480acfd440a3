//! Core library for the `benchkit` instrumentation kit.
//!
//! Benchmark code creates a kit for `n` steps, wraps every unit of work in a
//! `before(id)` / `after(id)` probe pair and tears the kit down. Teardown
//! reduces each step's samples to order statistics over its P50-P95 band and
//! publishes them through a write-once [`result::ResultHandle`].
//!
//! Two kits are provided: [`kit::time`] samples elapsed wall time and
//! [`kit::memory`] samples process memory counters. The `benchkit` binary
//! drives both against a demo workload and renders charts.
pub mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod kit;
pub mod mem;
pub mod result;
pub mod stats;

pub use kit::{BenchEach, BenchKit, bench, memory, time};
pub use stats::{Percentile, StepStats};
