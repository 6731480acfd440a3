use crate::stats::{Measure, root_of_mean, squared_distance};

/// Number of power-of-two allocation size classes tracked per snapshot.
pub const SIZE_CLASS_COUNT: usize = 16;
/// Upper bound, in bytes, of the first size class.
pub const SMALLEST_SIZE_CLASS: u64 = 8;

/// Allocation counts for one size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeClass {
    /// Largest request size, in bytes, counted in this class. The last class
    /// also counts every larger request.
    pub size: u64,
    pub allocations: u64,
    pub deallocations: u64,
}

/// A snapshot of every memory counter, treated as one arithmetic value.
///
/// All arithmetic is field-wise and goes through [`MemStats::zip_with`], so a
/// new counter only needs to be added there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemStats {
    /// Bytes currently allocated and not yet freed.
    pub allocated: u64,
    /// Cumulative bytes allocated, never decreases.
    pub total_allocated: u64,
    /// High-water mark of `allocated`.
    pub peak_allocated: u64,
    pub allocations: u64,
    pub deallocations: u64,
    pub reallocations: u64,
    /// Bytes of address space reserved from the operating system.
    pub sys: u64,
    /// Bytes backed by physical memory.
    pub resident: u64,
    /// Bytes of `sys` handed back to the operating system.
    pub released: u64,
    pub by_size: [SizeClass; SIZE_CLASS_COUNT],
}

/// Scalar counters in a snapshot, ahead of the size-class table.
const SCALAR_FIELDS: usize = 9;
/// Counters per size class.
const CLASS_FIELDS: usize = 3;
/// Every counter of a snapshot, size classes included.
pub const FIELD_COUNT: usize = SCALAR_FIELDS + CLASS_FIELDS * SIZE_CLASS_COUNT;

impl MemStats {
    /// Every counter in a fixed order: the scalars, then size, allocations
    /// and deallocations of each size class.
    #[must_use]
    pub fn fields(&self) -> [u64; FIELD_COUNT] {
        let scalars = [
            self.allocated,
            self.total_allocated,
            self.peak_allocated,
            self.allocations,
            self.deallocations,
            self.reallocations,
            self.sys,
            self.resident,
            self.released,
        ];
        let classes = self
            .by_size
            .iter()
            .flat_map(|class| [class.size, class.allocations, class.deallocations]);
        let mut out = [0; FIELD_COUNT];
        for (slot, value) in out.iter_mut().zip(scalars.into_iter().chain(classes)) {
            *slot = value;
        }
        out
    }

    /// Inverse of [`MemStats::fields`].
    #[must_use]
    pub fn from_fields(values: &[u64; FIELD_COUNT]) -> Self {
        let [
            allocated,
            total_allocated,
            peak_allocated,
            allocations,
            deallocations,
            reallocations,
            sys,
            resident,
            released,
            classes @ ..,
        ] = *values;
        let mut by_size = [SizeClass::default(); SIZE_CLASS_COUNT];
        for (class, chunk) in by_size.iter_mut().zip(classes.chunks_exact(CLASS_FIELDS)) {
            if let &[class_size, class_allocations, class_deallocations] = chunk {
                *class = SizeClass {
                    size: class_size,
                    allocations: class_allocations,
                    deallocations: class_deallocations,
                };
            }
        }
        Self {
            allocated,
            total_allocated,
            peak_allocated,
            allocations,
            deallocations,
            reallocations,
            sys,
            resident,
            released,
            by_size,
        }
    }

    /// Combine two snapshots counter by counter, including every size class.
    #[must_use]
    pub fn zip_with<F>(&self, other: &Self, mut op: F) -> Self
    where
        F: FnMut(u64, u64) -> u64,
    {
        let mut out = self.fields();
        for (slot, right) in out.iter_mut().zip(other.fields()) {
            *slot = op(*slot, right);
        }
        Self::from_fields(&out)
    }

    #[must_use]
    pub fn map<F>(&self, mut op: F) -> Self
    where
        F: FnMut(u64) -> u64,
    {
        self.zip_with(self, |value, _| op(value))
    }

    #[must_use]
    pub fn saturating_add(&self, other: &Self) -> Self {
        self.zip_with(other, u64::saturating_add)
    }

    /// Counter-wise `self - other`, floored at zero. Subtracting the setup
    /// baseline from a sample gives that sample's delta.
    #[must_use]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        self.zip_with(other, u64::saturating_sub)
    }

    #[must_use]
    pub fn saturating_mul(&self, other: &Self) -> Self {
        self.zip_with(other, u64::saturating_mul)
    }

    #[must_use]
    pub fn abs_diff(&self, other: &Self) -> Self {
        self.zip_with(other, u64::abs_diff)
    }

    /// Divide every counter by `count`; a zero count yields all zeros.
    #[must_use]
    pub fn scale_down(&self, count: u64) -> Self {
        self.map(|value| value.checked_div(count).unwrap_or(0))
    }

    #[must_use]
    pub fn isqrt(&self) -> Self {
        self.map(u64::isqrt)
    }

    /// Memory the process effectively holds: reserved minus released bytes.
    #[must_use]
    pub const fn effective(&self) -> u64 {
        self.sys.saturating_sub(self.released)
    }
}

/// Per-counter sums of squared deviations, widened to `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemSquares([u128; FIELD_COUNT]);

impl Default for MemSquares {
    fn default() -> Self {
        Self([0; FIELD_COUNT])
    }
}

impl Measure for MemStats {
    type Key = u64;
    type Squares = MemSquares;

    fn sort_key(&self) -> Self::Key {
        self.effective()
    }

    fn accumulate(&self, other: &Self) -> Self {
        self.saturating_add(other)
    }

    fn scaled_down(&self, count: u64) -> Self {
        self.scale_down(count)
    }

    fn add_squared_deviation(&self, mean: &Self, squares: MemSquares) -> MemSquares {
        let MemSquares(mut sums) = squares;
        for ((sum, value), center) in sums.iter_mut().zip(self.fields()).zip(mean.fields()) {
            *sum = sum.saturating_add(squared_distance(u128::from(value), u128::from(center)));
        }
        MemSquares(sums)
    }

    fn root_mean(squares: &MemSquares, count: u64) -> Self {
        let mut roots = [0; FIELD_COUNT];
        for (root, sum) in roots.iter_mut().zip(squares.0) {
            *root = u64::try_from(root_of_mean(sum, count)).unwrap_or(u64::MAX);
        }
        Self::from_fields(&roots)
    }
}
