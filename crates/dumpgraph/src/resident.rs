#![forbid(unsafe_code)]

//! Resident-set counting for mapped ranges.
//!
//! Counting is opportunistic: when the platform cannot answer, callers report
//! the virtual size instead and the snapshot still completes. The platform
//! is read once per dump into a [`ResidentMap`] and every range is counted
//! against that.

#[cfg(target_os = "linux")]
use crate::error::Error;
#[cfg(target_os = "linux")]
use tracing::debug;

pub trait ResidentCounter: Send + Sync {
    /// Resident bytes of every mapping of this process, or `None` when that
    /// cannot be determined.
    fn resident_map(&self) -> Option<ResidentMap>;
}

/// One mapping `[start, end)` and how many of its bytes are resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentRange {
    pub start: u64,
    pub end: u64,
    pub resident: u64,
}

/// Resident sizes of the process mappings at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentMap {
    ranges: Vec<ResidentRange>,
}

impl ResidentMap {
    pub fn new(mut ranges: Vec<ResidentRange>) -> Self {
        ranges.retain(|range| range.end > range.start);
        ranges.sort_by_key(|range| range.start);
        Self { ranges }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Resident bytes of `[start, start + len)`. Partially overlapping
    /// mappings contribute proportionally. `None` if no mapping overlaps.
    pub fn count_resident_bytes(&self, start: u64, len: u64) -> Option<u64> {
        let end = start.saturating_add(len);
        // Mappings never overlap, so ends are sorted along with starts.
        let first = self.ranges.partition_point(|range| range.end <= start);

        let mut resident = 0u64;
        let mut covered = false;
        for range in self.ranges[first..].iter().take_while(|range| range.start < end) {
            let lo = range.start.max(start);
            let hi = range.end.min(end);
            if hi <= lo {
                continue;
            }
            covered = true;
            let share = u128::from(range.resident) * u128::from(hi - lo)
                / u128::from(range.end - range.start);
            resident = resident.saturating_add(u64::try_from(share).unwrap_or(u64::MAX));
        }
        covered.then_some(resident)
    }
}

impl<T: ResidentCounter + ?Sized> ResidentCounter for std::sync::Arc<T> {
    fn resident_map(&self) -> Option<ResidentMap> {
        (**self).resident_map()
    }
}

/// Never knows. Used where counting is unsupported.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResidentCounter;

impl ResidentCounter for NoResidentCounter {
    fn resident_map(&self) -> Option<ResidentMap> {
        None
    }
}

/// Reads the `Rss` of every mapping from `/proc/self/smaps`.
#[cfg(target_os = "linux")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcfsResidentCounter;

#[cfg(target_os = "linux")]
impl ProcfsResidentCounter {
    fn read_smaps() -> Result<ResidentMap, Error> {
        let maps = procfs::process::Process::myself()?.smaps()?;
        let ranges = maps
            .into_iter()
            .map(|map| {
                let (start, end) = map.address;
                let resident = map.extension.map.get("Rss").copied().unwrap_or(0);
                ResidentRange { start, end, resident }
            })
            .collect();
        Ok(ResidentMap::new(ranges))
    }
}

#[cfg(target_os = "linux")]
impl ResidentCounter for ProcfsResidentCounter {
    fn resident_map(&self) -> Option<ResidentMap> {
        match Self::read_smaps() {
            Ok(map) => Some(map),
            Err(err) => {
                debug!(?err, "resident sizes unavailable");
                None
            }
        }
    }
}

/// The best counter available on this platform.
pub fn platform_counter() -> Box<dyn ResidentCounter> {
    #[cfg(target_os = "linux")]
    {
        Box::new(ProcfsResidentCounter)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NoResidentCounter)
    }
}

/// Resident bytes of the range, falling back to its virtual size.
pub fn resident_or_virtual(resident: Option<&ResidentMap>, start: u64, len: u64) -> u64 {
    resident
        .and_then(|map| map.count_resident_bytes(start, len))
        .unwrap_or(len)
}
