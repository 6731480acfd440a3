use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{MemStats, SIZE_CLASS_COUNT, SMALLEST_SIZE_CLASS, SizeClass};

/// Global allocator wrapper that counts every allocation it forwards.
///
/// Install it with `#[global_allocator]` to make the allocator counters of
/// [`MemStats`] meaningful; without it they stay at zero.
///
/// ```ignore
/// #[global_allocator]
/// static ALLOC: benchkit::mem::CountingAlloc = benchkit::mem::CountingAlloc::system();
/// ```
#[derive(Debug, Default)]
pub struct CountingAlloc<A = System> {
    inner: A,
}

impl CountingAlloc<System> {
    #[must_use]
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> CountingAlloc<A> {
    #[must_use]
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

struct AllocCounters {
    current: AtomicU64,
    total: AtomicU64,
    peak: AtomicU64,
    allocations: AtomicU64,
    deallocations: AtomicU64,
    reallocations: AtomicU64,
    class_allocations: [AtomicU64; SIZE_CLASS_COUNT],
    class_deallocations: [AtomicU64; SIZE_CLASS_COUNT],
}

static COUNTERS: AllocCounters = AllocCounters {
    current: AtomicU64::new(0),
    total: AtomicU64::new(0),
    peak: AtomicU64::new(0),
    allocations: AtomicU64::new(0),
    deallocations: AtomicU64::new(0),
    reallocations: AtomicU64::new(0),
    class_allocations: [const { AtomicU64::new(0) }; SIZE_CLASS_COUNT],
    class_deallocations: [const { AtomicU64::new(0) }; SIZE_CLASS_COUNT],
};

/// Index of the size class counting a request of `size` bytes.
#[must_use]
pub fn size_class_index(size: usize) -> usize {
    let size = size as u64;
    if size <= SMALLEST_SIZE_CLASS {
        return 0;
    }
    let ceil_log2 = u64::BITS.saturating_sub(size.saturating_sub(1).leading_zeros());
    let smallest_log2 = SMALLEST_SIZE_CLASS.trailing_zeros();
    let idx = usize::try_from(ceil_log2.saturating_sub(smallest_log2)).unwrap_or(usize::MAX);
    idx.min(SIZE_CLASS_COUNT.saturating_sub(1))
}

fn record_alloc(size: usize) {
    let bytes = size as u64;
    let current = COUNTERS
        .current
        .fetch_add(bytes, Ordering::Relaxed)
        .saturating_add(bytes);
    COUNTERS.peak.fetch_max(current, Ordering::Relaxed);
    COUNTERS.total.fetch_add(bytes, Ordering::Relaxed);
    COUNTERS.allocations.fetch_add(1, Ordering::Relaxed);
    if let Some(class) = COUNTERS.class_allocations.get(size_class_index(size)) {
        class.fetch_add(1, Ordering::Relaxed);
    }
}

fn record_dealloc(size: usize) {
    saturating_decrement(&COUNTERS.current, size as u64);
    COUNTERS.deallocations.fetch_add(1, Ordering::Relaxed);
    if let Some(class) = COUNTERS.class_deallocations.get(size_class_index(size)) {
        class.fetch_add(1, Ordering::Relaxed);
    }
}

/// A realloc moves the block between size classes but is not counted as an
/// allocation/deallocation pair; only growth adds to the cumulative total.
fn record_realloc(old_size: usize, new_size: usize) {
    COUNTERS.reallocations.fetch_add(1, Ordering::Relaxed);
    let old_bytes = old_size as u64;
    let new_bytes = new_size as u64;
    if new_bytes > old_bytes {
        let grow = new_bytes.saturating_sub(old_bytes);
        let current = COUNTERS
            .current
            .fetch_add(grow, Ordering::Relaxed)
            .saturating_add(grow);
        COUNTERS.peak.fetch_max(current, Ordering::Relaxed);
        COUNTERS.total.fetch_add(grow, Ordering::Relaxed);
    } else {
        saturating_decrement(&COUNTERS.current, old_bytes.saturating_sub(new_bytes));
    }
    if let Some(class) = COUNTERS.class_deallocations.get(size_class_index(old_size)) {
        class.fetch_add(1, Ordering::Relaxed);
    }
    if let Some(class) = COUNTERS.class_allocations.get(size_class_index(new_size)) {
        class.fetch_add(1, Ordering::Relaxed);
    }
}

fn saturating_decrement(counter: &AtomicU64, by: u64) {
    let mut current = counter.load(Ordering::Relaxed);
    loop {
        match counter.compare_exchange_weak(
            current,
            current.saturating_sub(by),
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current = actual,
        }
    }
}

/// Current allocator counters. OS-level fields are left at zero.
pub(super) fn allocator_counters() -> MemStats {
    let mut by_size = [SizeClass::default(); SIZE_CLASS_COUNT];
    let mut bound = SMALLEST_SIZE_CLASS;
    for ((class, allocs), frees) in by_size
        .iter_mut()
        .zip(COUNTERS.class_allocations.iter())
        .zip(COUNTERS.class_deallocations.iter())
    {
        *class = SizeClass {
            size: bound,
            allocations: allocs.load(Ordering::Relaxed),
            deallocations: frees.load(Ordering::Relaxed),
        };
        bound = bound.saturating_mul(2);
    }
    MemStats {
        allocated: COUNTERS.current.load(Ordering::Relaxed),
        total_allocated: COUNTERS.total.load(Ordering::Relaxed),
        peak_allocated: COUNTERS.peak.load(Ordering::Relaxed),
        allocations: COUNTERS.allocations.load(Ordering::Relaxed),
        deallocations: COUNTERS.deallocations.load(Ordering::Relaxed),
        reallocations: COUNTERS.reallocations.load(Ordering::Relaxed),
        by_size,
        ..MemStats::default()
    }
}

// Safety: every call is forwarded unchanged to `inner`, which upholds the
// `GlobalAlloc` contract; the wrapper only updates atomic counters and never
// allocates itself.
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAlloc<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // Safety: caller guarantees `layout` has non-zero size.
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // Safety: caller guarantees `layout` has non-zero size.
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // Safety: caller guarantees `ptr` came from this allocator with `layout`.
        unsafe { self.inner.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // Safety: caller guarantees `ptr`/`layout` describe a live block and
        // `new_size` is valid for `layout.align()`.
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_realloc(layout.size(), new_size);
        }
        new_ptr
    }
}
