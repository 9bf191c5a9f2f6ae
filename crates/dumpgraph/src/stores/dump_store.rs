#![forbid(unsafe_code)]

use crate::domain::AllocatorDump;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

new_key_type! { pub struct DumpId; }

/// Allocator dumps of one process, unique by name.
#[derive(Debug, Default)]
pub struct DumpStore {
    dumps: SlotMap<DumpId, AllocatorDump>,
    by_name: FxHashMap<String, DumpId>,
}

impl DumpStore {
    /// Insert `dump` unless its name is taken. The flag reports whether the
    /// returned dump is the one just inserted; otherwise `dump` is dropped and
    /// the existing one is returned.
    pub fn insert_with_flag(&mut self, dump: AllocatorDump) -> (&mut AllocatorDump, bool) {
        if let Some(&id) = self.by_name.get(dump.name()) {
            return (&mut self.dumps[id], false);
        }
        let name = dump.name().to_owned();
        let id = self.dumps.insert(dump);
        self.by_name.insert(name, id);
        (&mut self.dumps[id], true)
    }

    fn id_by_name(&self, name: &str) -> Option<DumpId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&AllocatorDump> {
        self.id_by_name(name).and_then(|id| self.dumps.get(id))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut AllocatorDump> {
        let id = self.id_by_name(name)?;
        self.dumps.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllocatorDump> {
        self.dumps.values()
    }

    pub fn len(&self) -> usize {
        self.dumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dumps.is_empty()
    }

    pub fn clear(&mut self) {
        self.dumps.clear();
        self.by_name.clear();
    }

    /// Remove every dump, leaving the store empty and reusable.
    pub fn take_all(&mut self) -> Vec<AllocatorDump> {
        self.by_name.clear();
        std::mem::take(&mut self.dumps)
            .into_iter()
            .map(|(_, dump)| dump)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DumpFlags, Guid, Units};
    use config::LevelOfDetail;

    fn dump(name: &str) -> AllocatorDump {
        AllocatorDump::new(name, Guid::from_key(name), DumpFlags::empty(), LevelOfDetail::Detailed)
    }

    #[test]
    fn names_are_unique() {
        let mut store = DumpStore::default();
        let (first, inserted) = store.insert_with_flag(dump("malloc"));
        assert!(inserted);
        first.add_scalar("size", Units::Bytes, 64);

        let (second, inserted) = store.insert_with_flag(dump("malloc"));
        assert!(!inserted);
        assert_eq!(second.size(), Some(64));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn take_all_empties_store() {
        let mut store = DumpStore::default();
        store.insert_with_flag(dump("a"));
        store.insert_with_flag(dump("b"));

        let taken = store.take_all();
        assert_eq!(taken.len(), 2);
        assert!(store.is_empty());
        assert!(store.by_name("a").is_none());

        let (_, inserted) = store.insert_with_flag(dump("a"));
        assert!(inserted);
    }
}
