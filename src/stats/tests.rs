use std::time::Duration;

use super::*;
use crate::error::ValidationError;
use crate::mem::MemStats;

fn millis(values: impl IntoIterator<Item = u64>) -> Vec<Duration> {
    values.into_iter().map(Duration::from_millis).collect()
}

fn one_to_hundred() -> StepStats<Duration> {
    // Shuffled on purpose: the engine sorts.
    let mut values: Vec<u64> = (1..=100).rev().collect();
    values.swap(3, 70);
    StepStats::from_samples(millis(values))
}

#[test]
fn percentile_bounds_on_one_to_hundred() -> Result<(), ValidationError> {
    let step = one_to_hundred();
    assert_eq!(step.p(Percentile::MAX), Duration::from_millis(100));
    assert_eq!(step.p(Percentile::new(1)?), Duration::from_millis(1));
    assert_eq!(step.p(Percentile::MIN), Duration::from_millis(1));
    assert_eq!(step.p(Percentile::P50), Duration::from_millis(50));
    assert_eq!(step.p(Percentile::P99), Duration::from_millis(99));
    Ok(())
}

#[test]
fn significant_band_over_hundred_samples_has_46_entries() {
    let step = one_to_hundred();
    let band = step.p_range(Percentile::P50, Percentile::P95);
    assert_eq!(band.len(), 46);
    assert_eq!(band.first(), Some(&Duration::from_millis(50)));
    assert_eq!(band.last(), Some(&Duration::from_millis(95)));
    assert_eq!(step.significant(), band);
}

#[test]
fn min_and_max_are_the_edges_of_the_significant_band() {
    let step = one_to_hundred();
    assert_eq!(step.min, Duration::from_millis(50));
    assert_eq!(step.max, Duration::from_millis(95));
    assert_ne!(step.min, step.all().first().copied().unwrap_or_default());
}

#[test]
fn samples_are_sorted_and_kept() {
    let step = StepStats::from_samples(millis([5, 3, 9, 1, 3]));
    assert_eq!(step.len(), 5);
    assert!(step.all().windows(2).all(|pair| match pair {
        [left, right] => left <= right,
        _ => false,
    }));
}

#[test]
fn mean_of_symmetric_band_is_its_midpoint() {
    // 100 samples 1..=100: the band is 50..=95, symmetric around 72.5ms.
    let step = one_to_hundred();
    assert_eq!(step.avg, Duration::from_micros(72_500));
}

#[test]
fn mean_and_deviation_of_symmetric_population() {
    let step = StepStats::from_samples(millis([10, 20, 30]));
    // Three samples: the band is ranks 2..=3.
    assert_eq!(step.significant(), millis([20, 30]).as_slice());
    assert_eq!(step.avg, Duration::from_millis(25));
    assert_eq!(step.sd, Duration::from_millis(5));
}

#[test]
fn constant_population_has_zero_deviation() {
    let step = StepStats::from_samples(millis([7; 40]));
    assert_eq!(step.avg, Duration::from_millis(7));
    assert_eq!(step.sd, Duration::ZERO);
    assert_eq!(step.min, step.max);
}

#[test]
fn empty_step_degrades_to_zero() {
    let step: StepStats<Duration> = StepStats::from_samples(Vec::new());
    assert!(step.is_empty());
    assert_eq!(step.p(Percentile::P99), Duration::ZERO);
    assert!(step.p_range(Percentile::MIN, Percentile::MAX).is_empty());
    assert!(step.significant().is_empty());
    assert_eq!(step.avg, Duration::ZERO);
    assert_eq!(step.sd, Duration::ZERO);
}

#[test]
fn single_sample_is_its_own_band() {
    let step = StepStats::from_samples(millis([42]));
    assert_eq!(step.significant(), millis([42]).as_slice());
    assert_eq!(step.min, Duration::from_millis(42));
    assert_eq!(step.max, Duration::from_millis(42));
    assert_eq!(step.avg, Duration::from_millis(42));
    assert_eq!(step.sd, Duration::ZERO);
}

#[test]
fn inverted_range_is_empty() {
    let step = one_to_hundred();
    assert!(step.p_range(Percentile::P95, Percentile::P50).is_empty());
}

#[test]
fn rank_uses_ceiling_and_clamps() -> Result<(), ValidationError> {
    assert_eq!(Percentile::P50.rank(0), 0);
    assert_eq!(Percentile::MIN.rank(10), 1);
    assert_eq!(Percentile::P50.rank(3), 2);
    assert_eq!(Percentile::P95.rank(3), 3);
    assert_eq!(Percentile::MAX.rank(10), 10);
    assert_eq!("99.9".parse::<Percentile>()?.rank(1000), 999);
    assert_eq!("99.9".parse::<Percentile>()?.rank(10), 10);
    Ok(())
}

#[test]
fn percentile_parsing() -> Result<(), ValidationError> {
    assert_eq!("50".parse::<Percentile>()?, Percentile::P50);
    assert_eq!("p90".parse::<Percentile>()?, Percentile::P90);
    assert_eq!("99.9".parse::<Percentile>()?.hundredths(), 9_990);
    assert_eq!("99.95".parse::<Percentile>()?.hundredths(), 9_995);
    assert_eq!(" 0 ".parse::<Percentile>()?, Percentile::MIN);
    assert!(matches!(
        "101".parse::<Percentile>(),
        Err(ValidationError::PercentileOutOfRange { hundredths: 10_100 })
    ));
    assert!(matches!(
        "".parse::<Percentile>(),
        Err(ValidationError::PercentileEmpty)
    ));
    assert!(matches!(
        "0.5x".parse::<Percentile>(),
        Err(ValidationError::InvalidPercentileFormat { .. })
    ));
    assert!(matches!(
        "99.999".parse::<Percentile>(),
        Err(ValidationError::PercentileTooPrecise { .. })
    ));
    assert!(Percentile::new(101).is_err());
    Ok(())
}

#[test]
fn percentile_display() -> Result<(), ValidationError> {
    assert_eq!(Percentile::P99.to_string(), "p99");
    assert_eq!("99.9".parse::<Percentile>()?.to_string(), "p99.9");
    assert_eq!("99.95".parse::<Percentile>()?.to_string(), "p99.95");
    Ok(())
}

#[test]
fn memory_samples_sort_by_effective_consumption() {
    let sample = |sys: u64, released: u64, allocated: u64| MemStats {
        sys,
        released,
        allocated,
        ..MemStats::default()
    };
    let step = StepStats::from_samples(vec![
        sample(1_000, 100, 1),
        sample(500, 0, 2),
        sample(2_000, 1_800, 3),
    ]);
    let order: Vec<u64> = step.all().iter().map(|mem| mem.allocated).collect();
    assert_eq!(order, vec![3, 2, 1]);
    let effective: Vec<u64> = step.all().iter().map(MemStats::effective).collect();
    assert_eq!(effective, vec![200, 500, 900]);
}

#[test]
fn memory_statistics_use_vector_arithmetic() {
    let sample = |sys: u64| MemStats {
        sys,
        allocated: sys.saturating_mul(2),
        ..MemStats::default()
    };
    let step = StepStats::from_samples(vec![sample(10), sample(30)]);
    // Two samples: band is ranks 1..=2.
    assert_eq!(step.avg.sys, 20);
    assert_eq!(step.avg.allocated, 40);
    assert_eq!(step.sd.sys, 10);
    assert_eq!(step.sd.allocated, 20);
    assert_eq!(step.min.sys, 10);
    assert_eq!(step.max.sys, 30);
}

#[test]
fn duration_squares_beyond_u64_nanos_do_not_saturate() {
    let samples = vec![Duration::from_secs(0), Duration::from_secs(10)];
    let step = StepStats::from_samples(samples);
    assert_eq!(step.avg, Duration::from_secs(5));
    assert_eq!(step.sd, Duration::from_secs(5));
}

#[test]
fn memory_deviation_beyond_u32_counters_does_not_saturate() {
    let sample = |sys: u64| MemStats {
        sys,
        total_allocated: sys,
        ..MemStats::default()
    };
    let step = StepStats::from_samples(vec![sample(0), sample(10_000_000_000)]);
    assert_eq!(step.avg.sys, 5_000_000_000);
    assert_eq!(step.sd.sys, 5_000_000_000);
    assert_eq!(step.sd.total_allocated, 5_000_000_000);
}

#[test]
fn memory_deviation_of_many_large_samples_does_not_saturate() {
    // Sorted: 20 zeros then 20 x 8e9. The band is ranks 20..=38, one zero
    // and eighteen 8e9 samples, whose squared deviation alone exceeds u64.
    let samples: Vec<MemStats> = (0..40_u64)
        .map(|idx| MemStats {
            sys: if idx % 2 == 0 { 0 } else { 8_000_000_000 },
            ..MemStats::default()
        })
        .collect();
    let step = StepStats::from_samples(samples);
    assert_eq!(step.significant().len(), 19);
    assert_eq!(step.avg.sys, 7_578_947_368);
    assert_eq!(step.sd.sys, 1_786_375_026);
}
