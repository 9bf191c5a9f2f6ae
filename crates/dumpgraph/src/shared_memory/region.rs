#![forbid(unsafe_code)]

use std::fmt;

/// Opaque identifier of a shared memory region, identical in every process
/// that maps it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(u128);

impl RegionId {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn from_parts(high: u64, low: u64) -> Self {
        Self(((high as u128) << 64) | low as u128)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl fmt::Debug for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegionId").field(&format_args!("{self}")).finish()
    }
}

/// One mapping of a region into this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedRegion {
    pub id: RegionId,
    pub address: u64,
    pub size: u64,
}

impl MappedRegion {
    pub fn new(id: RegionId, address: u64, size: u64) -> Self {
        Self { id, address, size }
    }
}
