#![forbid(unsafe_code)]

//! Providers backed by this process's own procfs entries.

use dumpgraph::{DumpArgs, DumpProvider, Error, ProcessMemoryDump};
#[cfg(target_os = "linux")]
use dumpgraph::{MappedRegion, NAME_SIZE, NAME_VIRTUAL_SIZE, RegionId, SharedMemoryTracker, Units};
#[cfg(target_os = "linux")]
use procfs::process::{MMPermissions, MMapPath, Process};
#[cfg(target_os = "linux")]
use std::collections::BTreeSet;
#[cfg(target_os = "linux")]
use tracing::trace;

/// Dump holding the process-wide resident and virtual totals.
pub const PROCESS_DUMP_NAME: &str = "process_memory";

/// Reports the resident and virtual size of the whole process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemoryMetrics;

impl DumpProvider for ProcessMemoryMetrics {
    fn name(&self) -> &str {
        "ProcessMemoryMetrics"
    }

    #[cfg(target_os = "linux")]
    fn on_memory_dump(&self, _args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
        let status = Process::myself()?.status()?;
        let dump = pmd.create_allocator_dump(PROCESS_DUMP_NAME);
        // procfs reports both in kB
        if let Some(rss) = status.vmrss {
            dump.add_scalar(NAME_SIZE, Units::Bytes, rss.saturating_mul(1024));
        }
        if let Some(vm) = status.vmsize {
            dump.add_scalar(NAME_VIRTUAL_SIZE, Units::Bytes, vm.saturating_mul(1024));
        }
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn on_memory_dump(&self, _args: &DumpArgs, _pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
        Err(Error::ProviderFailed {
            provider: self.name().to_owned(),
            reason: "process metrics need procfs".to_owned(),
        })
    }
}

/// Shared file-backed mappings of the current process.
///
/// A region is identified by the device and inode of the backing file, so
/// every process mapping the same object reports the same region id.
#[cfg(target_os = "linux")]
pub fn scan_shared_mappings() -> Result<Vec<MappedRegion>, Error> {
    let mut regions = Vec::new();
    for map in Process::myself()?.maps()? {
        if !map.perms.contains(MMPermissions::SHARED) || map.inode == 0 {
            continue;
        }
        let MMapPath::Path(path) = &map.pathname else {
            continue;
        };
        let (start, end) = map.address;
        let (major, minor) = map.dev;
        let device = (u64::from(major as u32) << 32) | u64::from(minor as u32);
        let id = RegionId::from_parts(device, map.inode);
        trace!(%id, path = %path.display(), start, end, "shared mapping");
        regions.push(MappedRegion::new(id, start, end.saturating_sub(start)));
    }
    Ok(regions)
}

/// Bring the tracker registry in line with the current shared mappings.
/// Returns the number of mapped regions.
#[cfg(target_os = "linux")]
pub fn refresh_shared_mappings(tracker: &SharedMemoryTracker) -> Result<usize, Error> {
    let current = scan_shared_mappings()?;
    let live: BTreeSet<u64> = current.iter().map(|region| region.address).collect();

    for stale in tracker
        .mapped_regions()
        .into_iter()
        .filter(|region| !live.contains(&region.address))
    {
        tracker.decrement_memory_usage(stale.address);
    }
    let mapped = current.len();
    for region in current {
        tracker.increment_memory_usage(region);
    }
    Ok(mapped)
}
