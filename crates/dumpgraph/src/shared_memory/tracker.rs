#![forbid(unsafe_code)]

use super::{MappedRegion, RegionId};
use crate::domain::{DumpArgs, Guid, NAME_SIZE, NAME_VIRTUAL_SIZE, Units};
use crate::error::Error;
use crate::process_memory_dump::ProcessMemoryDump;
use crate::provider::DumpProvider;
use crate::resident::{self, ResidentCounter, ResidentMap};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::{debug, trace};

const DUMP_NAME_PREFIX: &str = "shared_memory";

/// Tracks the shared memory regions mapped into this process and reports
/// them as dumps.
///
/// Every process mapping a region names it the same way, so the local dump
/// of each process can be tied to one global dump for the region.
pub struct SharedMemoryTracker {
    usages: Mutex<FxHashMap<u64, MappedRegion>>,
    resident: Box<dyn ResidentCounter>,
}

impl Default for SharedMemoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedMemoryTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedMemoryTracker")
            .field("regions", &self.usages.lock().len())
            .finish_non_exhaustive()
    }
}

impl SharedMemoryTracker {
    pub const PROVIDER_NAME: &'static str = "SharedMemoryTracker";

    pub fn new() -> Self {
        Self::with_resident_counter(resident::platform_counter())
    }

    pub fn with_resident_counter(resident: Box<dyn ResidentCounter>) -> Self {
        Self {
            usages: Mutex::new(FxHashMap::default()),
            resident,
        }
    }

    /// Name of the local dump for `region`.
    pub fn dump_name(region: RegionId) -> String {
        format!("{DUMP_NAME_PREFIX}/{region}")
    }

    /// Guid of the global dump for `region`. It carries no process identity
    /// and always uses the default [`Guid::from_key`] hashing, so it is the
    /// same in every process.
    pub fn global_dump_guid(region: RegionId) -> Guid {
        Guid::from_key(&Self::dump_name(region))
    }

    pub fn increment_memory_usage(&self, region: MappedRegion) {
        trace!(id = %region.id, address = region.address, size = region.size, "region mapped");
        self.usages.lock().insert(region.address, region);
    }

    pub fn decrement_memory_usage(&self, address: u64) -> Option<MappedRegion> {
        let removed = self.usages.lock().remove(&address);
        if let Some(region) = &removed {
            trace!(id = %region.id, address, "region unmapped");
        }
        removed
    }

    /// Copy of the currently mapped regions.
    pub fn mapped_regions(&self) -> Vec<MappedRegion> {
        self.usages.lock().values().copied().collect()
    }

    /// Add the local and global dumps for one mapping, sized from `resident`
    /// when it covers the mapping. Returns the local dump guid, or `None` if
    /// the region was already dumped.
    pub fn add_region_dump(
        &self,
        region: &MappedRegion,
        resident: Option<&ResidentMap>,
        pmd: &mut ProcessMemoryDump,
    ) -> Option<Guid> {
        let name = Self::dump_name(region.id);
        // The same region may be mapped more than once.
        if pmd.get_allocator_dump(&name).is_some() {
            return None;
        }
        let size = resident::resident_or_virtual(resident, region.address, region.size);

        let local = pmd.create_allocator_dump(&name);
        local.add_scalar(NAME_SIZE, Units::Bytes, size);
        local.add_scalar(NAME_VIRTUAL_SIZE, Units::Bytes, region.size);
        let local_guid = local.guid();

        let global_guid = Self::global_dump_guid(region.id);
        pmd.create_shared_global_allocator_dump(global_guid)
            .add_scalar(NAME_SIZE, Units::Bytes, size);

        // Clients override this with their own importance.
        pmd.add_overridable_ownership_edge(local_guid, global_guid, 0);
        Some(local_guid)
    }
}

impl DumpProvider for SharedMemoryTracker {
    fn name(&self) -> &str {
        Self::PROVIDER_NAME
    }

    fn on_memory_dump(&self, _args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
        // Never hold the registry lock while building dumps.
        let regions = self.mapped_regions();
        if regions.is_empty() {
            return Ok(());
        }
        let resident = self.resident.resident_map();
        let dumped = regions
            .iter()
            .filter_map(|region| self.add_region_dump(region, resident.as_ref(), pmd))
            .count();
        debug!(mapped = regions.len(), dumped, "shared memory regions dumped");
        Ok(())
    }
}
