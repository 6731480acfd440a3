use super::MemStats;
use super::alloc::allocator_counters;

/// Something that can take a full memory snapshot.
///
/// Reads are treated as always succeeding; a source that cannot read a
/// counter reports it as zero.
pub trait MemorySource {
    fn snapshot(&self) -> MemStats;
}

impl<F> MemorySource for F
where
    F: Fn() -> MemStats,
{
    fn snapshot(&self) -> MemStats {
        self()
    }
}

/// Snapshot of the current process: counters from [`super::CountingAlloc`]
/// combined with the operating system's view of the address space.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemory;

impl MemorySource for ProcessMemory {
    fn snapshot(&self) -> MemStats {
        let os = read_os_memory();
        MemStats {
            sys: os.sys,
            resident: os.resident,
            released: os.released,
            ..allocator_counters()
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct OsMemory {
    sys: u64,
    resident: u64,
    released: u64,
}

#[cfg(feature = "alloc-profiler")]
fn read_os_memory() -> OsMemory {
    match read_jemalloc_memory() {
        Ok(memory) => memory,
        Err(err) => {
            tracing::warn!("jemalloc stats read failed, reporting zeros: {}", err);
            OsMemory::default()
        }
    }
}

/// jemalloc keeps retained mappings out of `stats.mapped`; they count as
/// reserved but released.
#[cfg(feature = "alloc-profiler")]
fn read_jemalloc_memory() -> Result<OsMemory, jemalloc_ctl::Error> {
    jemalloc_ctl::epoch::advance()?;
    let mapped = jemalloc_ctl::stats::mapped::read()? as u64;
    let retained = jemalloc_ctl::stats::retained::read()? as u64;
    let resident = jemalloc_ctl::stats::resident::read()? as u64;
    Ok(OsMemory {
        sys: mapped.saturating_add(retained),
        resident,
        released: retained,
    })
}

#[cfg(all(not(feature = "alloc-profiler"), target_os = "linux"))]
fn read_os_memory() -> OsMemory {
    read_statm().unwrap_or_else(|| {
        tracing::warn!("/proc/self/statm unreadable, reporting zeros");
        OsMemory::default()
    })
}

#[cfg(all(not(feature = "alloc-profiler"), not(target_os = "linux")))]
fn read_os_memory() -> OsMemory {
    OsMemory::default()
}

/// Reads `/proc/self/statm` into a stack buffer so a probe does not itself
/// allocate. Pages not resident count as released.
#[cfg(all(not(feature = "alloc-profiler"), target_os = "linux"))]
fn read_statm() -> Option<OsMemory> {
    use std::io::Read;

    let mut file = std::fs::File::open("/proc/self/statm").ok()?;
    let mut buf = [0u8; 128];
    let len = file.read(&mut buf).ok()?;
    let text = std::str::from_utf8(buf.get(..len)?).ok()?;
    let mut parts = text.split_whitespace();
    let size_pages = parts.next()?.parse::<u64>().ok()?;
    let resident_pages = parts.next()?.parse::<u64>().ok()?;
    // Safety: sysconf is safe to call; we only read the page size.
    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if page_size <= 0 {
        return None;
    }
    let page_size = u64::try_from(page_size).ok()?;
    let sys = size_pages.saturating_mul(page_size);
    let resident = resident_pages.saturating_mul(page_size);
    Some(OsMemory {
        sys,
        resident,
        released: sys.saturating_sub(resident),
    })
}
