//! Memory metric vector and the sources that fill it.
mod alloc;
mod source;
mod stats;

#[cfg(test)]
mod tests;

pub use alloc::{CountingAlloc, size_class_index};
pub use source::{MemorySource, ProcessMemory};
pub use stats::{
    FIELD_COUNT, MemSquares, MemStats, SIZE_CLASS_COUNT, SMALLEST_SIZE_CLASS, SizeClass,
};
