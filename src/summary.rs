use std::time::Duration;

use benchkit::mem::MemStats;
use benchkit::result::{MemResult, MemStep, TimeResult};
use benchkit::stats::{Percentile, StepStats};

/// Microseconds per millisecond.
const US_PER_MS: u128 = 1_000;
/// Bytes per mebibyte.
const BYTES_PER_MIB: u64 = 1_048_576;
/// Fraction scale for formatted mebibytes.
const MIB_FRACTION_SCALE: u64 = 100;

pub(crate) fn format_duration(value: Duration) -> String {
    let micros = value.as_micros();
    if micros < US_PER_MS {
        return format!("{}us", micros);
    }
    format!("{}.{:03}ms", micros / US_PER_MS, micros % US_PER_MS)
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    if bytes < BYTES_PER_MIB {
        return format!("{}B", bytes);
    }
    let hundredths = u128::from(bytes)
        .saturating_mul(u128::from(MIB_FRACTION_SCALE))
        .checked_div(u128::from(BYTES_PER_MIB))
        .unwrap_or(0);
    let scale = u128::from(MIB_FRACTION_SCALE);
    format!("{}.{:02}MiB", hundredths / scale, hundredths % scale)
}

fn marker_line<S, F>(step: &StepStats<S>, markers: &[Percentile], format: F) -> String
where
    S: benchkit::stats::Measure,
    F: Fn(&S) -> String,
{
    markers
        .iter()
        .map(|marker| format!("{} {}", marker, format(&step.p(*marker))))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub(crate) fn time_lines(result: &TimeResult, markers: &[Percentile]) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.each.len().saturating_add(1));
    lines.push(format!(
        "Time: {} steps, warmup {}, measured {}",
        result.n,
        format_duration(result.warmup()),
        format_duration(result.elapsed())
    ));
    for (id, step) in result.each.iter().enumerate() {
        lines.push(format!(
            "  step {}: {} samples, avg {} sd {} min {} max {} | {}",
            id,
            step.len(),
            format_duration(step.avg),
            format_duration(step.sd),
            format_duration(step.min),
            format_duration(step.max),
            marker_line(step, markers, |value| format_duration(*value))
        ));
    }
    lines
}

pub(crate) fn memory_lines(result: &MemResult, markers: &[Percentile]) -> Vec<String> {
    let effective = |mem: &MemStats| format_bytes(mem.effective());
    let mut lines = Vec::with_capacity(result.each.len().saturating_add(2));
    lines.push(format!(
        "Memory: {} steps, effective at setup {} / start {} / teardown {}",
        result.n,
        effective(&result.setup),
        effective(&result.start),
        effective(&result.teardown)
    ));
    lines.push(format!(
        "  allocated at setup {} / teardown {} (peak {})",
        format_bytes(result.setup.allocated),
        format_bytes(result.teardown.allocated),
        format_bytes(result.teardown.peak_allocated)
    ));
    for (id, step) in result.each.iter().enumerate() {
        lines.push(memory_step_line(id, step, markers));
    }
    lines
}

/// Effective consumption is not linear in the counters, so its spread is
/// reported per counter rather than as one effective figure.
fn memory_step_line(id: usize, step: &MemStep, markers: &[Percentile]) -> String {
    let effective = |mem: &MemStats| format_bytes(mem.effective());
    format!(
        concat!(
            "  step {}: {} samples, effective avg {} min {} max {}, ",
            "sd sys {} resident {} allocated {}, allocated avg {} | {}"
        ),
        id,
        step.len(),
        effective(&step.avg),
        effective(&step.min),
        effective(&step.max),
        format_bytes(step.sd.sys),
        format_bytes(step.sd.resident),
        format_bytes(step.sd.allocated),
        format_bytes(step.avg.allocated),
        marker_line(step, markers, effective)
    )
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
