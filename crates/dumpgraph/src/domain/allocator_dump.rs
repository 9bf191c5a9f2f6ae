#![forbid(unsafe_code)]

use super::entry::{Entry, NAME_SIZE, Units};
use super::Guid;
use bitflags::bitflags;
use config::LevelOfDetail;
use std::collections::BTreeMap;
use tracing::trace;

bitflags! {
    /// Node flags. The empty set is the default, "real" dump.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DumpFlags: u32 {
        /// A global dump that only exists because something points at it.
        /// It does not keep unrelated graph content alive on its own.
        const WEAK = 1;
    }
}

/// One accounted memory region and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatorDump {
    name: String,
    guid: Guid,
    flags: DumpFlags,
    level_of_detail: LevelOfDetail,
    entries: BTreeMap<String, Entry>,
}

impl AllocatorDump {
    pub fn new(
        name: impl Into<String>,
        guid: Guid,
        flags: DumpFlags,
        level_of_detail: LevelOfDetail,
    ) -> Self {
        Self {
            name: name.into(),
            guid,
            flags,
            level_of_detail,
            entries: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn guid(&self) -> Guid {
        self.guid
    }

    pub fn flags(&self) -> DumpFlags {
        self.flags
    }

    pub fn is_weak(&self) -> bool {
        self.flags.contains(DumpFlags::WEAK)
    }

    pub fn set_flags(&mut self, flags: DumpFlags) {
        self.flags.insert(flags);
    }

    pub fn clear_flags(&mut self, flags: DumpFlags) {
        self.flags.remove(flags);
    }

    pub fn add_scalar(&mut self, name: impl Into<String>, units: Units, value: u64) {
        self.entries.insert(name.into(), Entry::scalar(units, value));
    }

    /// String attributes can carry arbitrary content, so background dumps
    /// drop them.
    pub fn add_string(&mut self, name: impl Into<String>, units: Units, value: impl Into<String>) {
        let name = name.into();
        if self.level_of_detail == LevelOfDetail::Background {
            trace!(dump = %self.name, attribute = %name, "dropping string attribute in background mode");
            return;
        }
        self.entries.insert(name, Entry::string(units, value));
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> &BTreeMap<String, Entry> {
        &self.entries
    }

    /// The `size` attribute, if one was recorded.
    pub fn size(&self) -> Option<u64> {
        self.entry(NAME_SIZE).and_then(Entry::as_scalar)
    }

    /// Fold another dump for the same node into this one. Strong wins over
    /// weak and the other dump's attributes overwrite ours.
    pub(crate) fn absorb(&mut self, other: AllocatorDump) {
        if !other.is_weak() {
            self.clear_flags(DumpFlags::WEAK);
        }
        self.entries.extend(other.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NAME_OBJECT_COUNT;

    fn dump(level: LevelOfDetail) -> AllocatorDump {
        AllocatorDump::new("malloc", Guid::new(7), DumpFlags::empty(), level)
    }

    #[test]
    fn scalar_overwrites() {
        let mut mad = dump(LevelOfDetail::Detailed);
        mad.add_scalar(NAME_SIZE, Units::Bytes, 1);
        mad.add_scalar(NAME_SIZE, Units::Bytes, 4096);
        mad.add_scalar(NAME_OBJECT_COUNT, Units::Objects, 3);

        assert_eq!(mad.size(), Some(4096));
        assert_eq!(mad.entries().len(), 2);
    }

    #[test]
    fn strings_are_dropped_in_background() {
        let mut mad = dump(LevelOfDetail::Background);
        mad.add_string("url", Units::Objects, "https://example.com/secret");
        assert!(mad.entry("url").is_none());

        let mut mad = dump(LevelOfDetail::Detailed);
        mad.add_string("url", Units::Objects, "https://example.com/");
        assert!(mad.entry("url").is_some());
        assert_eq!(mad.entry("url").unwrap().as_scalar(), None);
    }

    #[test]
    fn weak_flag_round_trip() {
        let mut mad = dump(LevelOfDetail::Detailed);
        assert!(!mad.is_weak());
        mad.set_flags(DumpFlags::WEAK);
        assert!(mad.is_weak());
        mad.clear_flags(DumpFlags::WEAK);
        assert_eq!(mad.flags(), DumpFlags::empty());
    }

    #[test]
    fn absorb_lets_strong_win() {
        let mut weak = AllocatorDump::new("g", Guid::new(1), DumpFlags::WEAK, LevelOfDetail::Detailed);
        let mut strong = AllocatorDump::new("g", Guid::new(1), DumpFlags::empty(), LevelOfDetail::Detailed);
        strong.add_scalar(NAME_SIZE, Units::Bytes, 10);

        weak.absorb(strong);
        assert!(!weak.is_weak());
        assert_eq!(weak.size(), Some(10));
    }
}
