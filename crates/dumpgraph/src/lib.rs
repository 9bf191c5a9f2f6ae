#![forbid(unsafe_code)]

//! Per-process memory-dump graph.
//!
//! A [`ProcessMemoryDump`] collects the allocator dumps reported by every
//! [`DumpProvider`] during one sampling pass, the shared global dumps they
//! point at, and the ownership edges between them. The finished graph is
//! turned into a [`DumpSnapshot`] for serialization.

pub mod domain;
pub mod error;
pub mod process_memory_dump;
pub mod provider;
pub mod resident;
pub mod shared_memory;
pub mod snapshot;
pub mod stores;
pub mod whitelist;

pub use domain::{
    AllocatorDump, DumpArgs, DumpFlags, Entry, EntryValue, Guid, KeyHasher, NAME_OBJECT_COUNT,
    NAME_SIZE, NAME_VIRTUAL_SIZE, OwnershipEdge, ProcessToken, Sha1KeyHasher, Units, merge_edge,
};
pub use error::Error;
pub use process_memory_dump::{BLACK_HOLE_DUMP_NAME, ProcessMemoryDump};
pub use provider::{DumpProvider, InvocationReport, invoke_providers, should_invoke};
pub use resident::{NoResidentCounter, ResidentCounter, ResidentMap, ResidentRange};
#[cfg(target_os = "linux")]
pub use resident::ProcfsResidentCounter;
pub use shared_memory::{MappedRegion, RegionId, SharedMemoryTracker};
pub use snapshot::{DumpNode, DumpSnapshot, EdgeRecord};
pub use whitelist::{Whitelist, normalize_dump_name};
