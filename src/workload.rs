//! Demo workloads the binary measures.
use std::time::Duration;

use rand::{Rng, thread_rng};
use tracing::{debug, info};

use benchkit::error::{BenchError, BenchResult};
use benchkit::kit::{self, BenchEach, BenchKit};
use benchkit::result::{MemResult, ResultHandle, TimeResult};

use benchkit::config::RunSettings;

/// Sleep of step `id`: `(id + 1)` times the base step.
fn step_sleep(step_ms: u64, id: usize) -> Duration {
    let factor = u64::try_from(id.saturating_add(1)).unwrap_or(u64::MAX);
    Duration::from_millis(step_ms.saturating_mul(factor))
}

/// Step `id` sleeps `(id + 1) * step_ms`, repeated `repetitions` times.
///
/// # Errors
///
/// Propagates probe and lifecycle errors from the kit.
pub(crate) fn run_time(settings: &RunSettings) -> BenchResult<ResultHandle<TimeResult>> {
    let (mut kit, results) = kit::time(settings.steps, settings.repetitions);
    info!(
        "timing {} steps x {} repetitions, base step {}ms",
        settings.steps, settings.repetitions, settings.step_ms
    );

    kit::bench(&mut kit, |each| {
        for rep in 0..settings.repetitions {
            for id in 0..settings.steps {
                each.before(id)?;
                std::thread::sleep(step_sleep(settings.step_ms, id));
                each.after(id)?;
            }
            debug!("repetition {} done", rep);
        }
        Ok(())
    })?;

    Ok(results)
}

/// One random buffer per step is built between setup and starting; every
/// repetition of step `id` appends a copy of buffer `id` to a growing archive.
///
/// # Errors
///
/// Propagates probe and lifecycle errors from the kit.
pub(crate) fn run_memory(settings: &RunSettings) -> BenchResult<ResultHandle<MemResult>> {
    let (mut kit, results) = kit::memory_with_hint(settings.steps, settings.repetitions);
    info!(
        "tracking memory over {} steps x {} repetitions, {} bytes per sample",
        settings.steps, settings.repetitions, settings.alloc_bytes
    );

    kit.setup()?;
    let fixtures = fixtures(settings.steps, settings.alloc_bytes);
    kit.starting()?;

    let mut archive: Vec<Vec<u8>> = Vec::new();
    let each = kit.each();
    for _ in 0..settings.repetitions {
        for id in 0..settings.steps {
            let fixture = fixtures.get(id).ok_or(BenchError::Domain {
                id,
                n: settings.steps,
            })?;
            each.before(id)?;
            archive.push(fixture.clone());
            each.after(id)?;
        }
    }
    debug!("archive holds {} buffers", archive.len());

    kit.teardown()?;
    drop(archive);
    Ok(results)
}

fn fixtures(count: usize, bytes: usize) -> Vec<Vec<u8>> {
    let mut rng = thread_rng();
    (0..count)
        .map(|_| {
            let mut buffer = vec![0_u8; bytes];
            rng.fill(buffer.as_mut_slice());
            buffer
        })
        .collect()
}
