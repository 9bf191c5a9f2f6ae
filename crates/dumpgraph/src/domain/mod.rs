#![forbid(unsafe_code)]

mod allocator_dump;
mod args;
mod edge;
mod entry;
mod guid;

pub use allocator_dump::{AllocatorDump, DumpFlags};
pub use args::DumpArgs;
pub use edge::{OwnershipEdge, merge_edge};
pub use entry::{Entry, EntryValue, NAME_OBJECT_COUNT, NAME_SIZE, NAME_VIRTUAL_SIZE, Units};
pub use guid::{Guid, KeyHasher, ProcessToken, Sha1KeyHasher};
