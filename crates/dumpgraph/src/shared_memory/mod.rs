#![forbid(unsafe_code)]

mod region;
mod tracker;

pub use region::{MappedRegion, RegionId};
pub use tracker::SharedMemoryTracker;
