use std::thread::sleep;
use std::time::Duration;

use benchkit::error::BenchError;
use benchkit::kit::{BenchEach, BenchKit, bench, time};

const STEPS: usize = 3;
const REPETITIONS: usize = 10;

fn step_sleep(id: usize) -> Duration {
    Duration::from_millis(u64::try_from(id).unwrap_or(0).saturating_add(1))
}

#[test]
fn three_steps_with_growing_sleeps() -> Result<(), BenchError> {
    let (mut kit, results) = time(STEPS, REPETITIONS);

    bench(&mut kit, |each| {
        for _ in 0..REPETITIONS {
            for id in 0..STEPS {
                each.before(id)?;
                sleep(step_sleep(id));
                each.after(id)?;
            }
        }
        Ok(())
    })?;

    let result = results.get()?;
    assert_eq!(result.n, STEPS);
    assert_eq!(result.each.len(), STEPS);
    for (id, step) in result.each.iter().enumerate() {
        assert_eq!(step.len(), REPETITIONS);
        assert!(step.min <= step.avg);
        assert!(step.avg <= step.max);
        assert!(step.min >= step_sleep(id));
    }

    let averages: Vec<Duration> = result.each.iter().map(|step| step.avg).collect();
    assert!(averages.windows(2).all(|pair| match pair {
        [lower, upper] => lower < upper,
        _ => false,
    }));
    assert!(result.elapsed() >= Duration::from_millis(60));
    Ok(())
}

#[test]
fn results_are_unavailable_until_teardown() -> Result<(), BenchError> {
    let (mut kit, results) = time(1, 1);
    kit.setup()?;
    assert!(results.get().is_err());
    kit.starting()?;
    kit.each().before(0)?;
    kit.each().after(0)?;
    assert!(!results.is_ready());
    kit.teardown()?;
    assert!(results.is_ready());
    Ok(())
}
