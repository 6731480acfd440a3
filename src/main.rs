mod entry;
mod logger;
mod summary;
mod workload;

use benchkit::error::AppResult;
use benchkit::mem::CountingAlloc;

#[cfg(not(feature = "alloc-profiler"))]
#[global_allocator]
static ALLOC: CountingAlloc = CountingAlloc::system();

#[cfg(feature = "alloc-profiler")]
#[global_allocator]
static ALLOC: CountingAlloc<jemallocator::Jemalloc> = CountingAlloc::new(jemallocator::Jemalloc);

fn main() -> AppResult<()> {
    entry::run()
}
