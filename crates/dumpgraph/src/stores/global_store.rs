#![forbid(unsafe_code)]

use crate::domain::{AllocatorDump, Guid};
use crate::stores::DumpId;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

/// Shared global dumps, unique by guid rather than by name so that every
/// process mapping the same resource converges on one node.
#[derive(Debug, Default)]
pub struct GlobalDumpStore {
    dumps: SlotMap<DumpId, AllocatorDump>,
    by_guid: FxHashMap<Guid, DumpId>,
}

impl GlobalDumpStore {
    pub fn insert_with_flag(&mut self, dump: AllocatorDump) -> (&mut AllocatorDump, bool) {
        let guid = dump.guid();
        if let Some(&id) = self.by_guid.get(&guid) {
            return (&mut self.dumps[id], false);
        }
        let id = self.dumps.insert(dump);
        self.by_guid.insert(guid, id);
        (&mut self.dumps[id], true)
    }

    /// Insert `dump`, folding it into the existing node for its guid if any.
    pub fn merge(&mut self, dump: AllocatorDump) {
        match self.by_guid.get(&dump.guid()) {
            Some(&id) => self.dumps[id].absorb(dump),
            None => {
                self.insert_with_flag(dump);
            }
        }
    }

    fn id_by_guid(&self, guid: Guid) -> Option<DumpId> {
        self.by_guid.get(&guid).copied()
    }

    pub fn by_guid(&self, guid: Guid) -> Option<&AllocatorDump> {
        self.id_by_guid(guid).and_then(|id| self.dumps.get(id))
    }

    pub fn by_guid_mut(&mut self, guid: Guid) -> Option<&mut AllocatorDump> {
        let id = self.id_by_guid(guid)?;
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
        self.by_guid.clear();
    }

    pub fn take_all(&mut self) -> Vec<AllocatorDump> {
        self.by_guid.clear();
        std::mem::take(&mut self.dumps)
            .into_iter()
            .map(|(_, dump)| dump)
            .collect()
    }
}
