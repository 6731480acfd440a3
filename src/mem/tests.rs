use super::*;

fn filled(value: u64) -> MemStats {
    MemStats::default().map(|_| value)
}

#[test]
fn field_wise_operations_reach_every_counter() {
    let three = filled(3);
    let five = filled(5);
    assert_eq!(three.saturating_add(&five), filled(8));
    assert_eq!(five.saturating_sub(&three), filled(2));
    assert_eq!(three.saturating_sub(&five), filled(0));
    assert_eq!(three.saturating_mul(&five), filled(15));
    assert_eq!(three.abs_diff(&five), filled(2));
    assert_eq!(filled(15).scale_down(5), filled(3));
    assert_eq!(filled(17).isqrt(), filled(4));
}

#[test]
fn size_class_table_is_part_of_the_vector() {
    let mut left = MemStats::default();
    let mut right = MemStats::default();
    if let (Some(l), Some(r)) = (left.by_size.last_mut(), right.by_size.last_mut()) {
        l.allocations = 4;
        r.allocations = 6;
        l.size = 2;
        r.size = 2;
    }
    let sum = left.saturating_add(&right);
    assert_eq!(sum.by_size.last().map(|class| class.allocations), Some(10));
    assert_eq!(sum.by_size.last().map(|class| class.size), Some(4));
    assert_eq!(sum.by_size.first(), Some(&SizeClass::default()));
}

#[test]
fn scale_down_by_zero_is_zero() {
    assert_eq!(filled(9).scale_down(0), MemStats::default());
}

#[test]
fn effective_consumption_is_reserved_minus_released() {
    let stats = MemStats {
        sys: 1_000,
        released: 300,
        resident: 700,
        ..MemStats::default()
    };
    assert_eq!(stats.effective(), 700);
    let inverted = MemStats {
        sys: 10,
        released: 20,
        ..MemStats::default()
    };
    assert_eq!(inverted.effective(), 0);
}

#[test]
fn size_classes_are_powers_of_two() {
    assert_eq!(size_class_index(0), 0);
    assert_eq!(size_class_index(8), 0);
    assert_eq!(size_class_index(9), 1);
    assert_eq!(size_class_index(16), 1);
    assert_eq!(size_class_index(17), 2);
    assert_eq!(size_class_index(4096), 9);
    assert_eq!(size_class_index(usize::MAX), SIZE_CLASS_COUNT - 1);
}

#[test]
fn process_snapshot_reports_size_class_bounds() {
    let snapshot = ProcessMemory.snapshot();
    assert_eq!(
        snapshot.by_size.first().map(|class| class.size),
        Some(SMALLEST_SIZE_CLASS)
    );
    assert_eq!(
        snapshot.by_size.get(1).map(|class| class.size),
        Some(SMALLEST_SIZE_CLASS * 2)
    );
    assert!(snapshot.released <= snapshot.sys);
}

#[test]
fn closures_are_memory_sources() {
    let source = || filled(1);
    assert_eq!(source.snapshot(), filled(1));
}

#[test]
fn field_order_round_trips() {
    let mut stats = MemStats {
        allocated: 1,
        total_allocated: 2,
        peak_allocated: 3,
        allocations: 4,
        deallocations: 5,
        reallocations: 6,
        sys: 7,
        resident: 8,
        released: 9,
        ..MemStats::default()
    };
    if let Some(class) = stats.by_size.last_mut() {
        class.size = 10;
        class.allocations = 11;
        class.deallocations = 12;
    }
    let fields = stats.fields();
    assert_eq!(fields.get(..9), Some(&[1, 2, 3, 4, 5, 6, 7, 8, 9][..]));
    assert_eq!(fields.get(FIELD_COUNT - 3..), Some(&[10, 11, 12][..]));
    assert_eq!(MemStats::from_fields(&fields), stats);
}
