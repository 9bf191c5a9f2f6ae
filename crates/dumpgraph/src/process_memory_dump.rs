#![forbid(unsafe_code)]

use crate::domain::{
    AllocatorDump, DumpArgs, DumpFlags, Guid, KeyHasher, OwnershipEdge, ProcessToken, Sha1KeyHasher,
};
use crate::shared_memory::{RegionId, SharedMemoryTracker};
use crate::snapshot::DumpSnapshot;
use crate::stores::{DumpStore, EdgeTable, GlobalDumpStore};
use crate::whitelist::Whitelist;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace, warn};

/// Name of the sentinel dump that absorbs writes to redacted dumps.
pub const BLACK_HOLE_DUMP_NAME: &str = "discard";

const GLOBAL_DUMP_PREFIX: &str = "global/";

static DEFAULT_WHITELIST: LazyLock<Arc<Whitelist>> =
    LazyLock::new(|| Arc::new(Whitelist::default()));

/// The memory-dump graph of one process for one sampling pass.
///
/// Nodes are allocator dumps, unique by name, plus shared global dumps,
/// unique by guid. Edges record which node accounts for which, at most one
/// per source. In background mode every name is checked against the
/// [`Whitelist`] and rejected dumps are redirected to a sentinel that never
/// reaches the graph.
///
/// Names share one namespace: `global/<guid>`, with the guid in its display
/// form, always addresses the shared global dump for that guid.
#[derive(Debug)]
pub struct ProcessMemoryDump {
    args: DumpArgs,
    process_token: ProcessToken,
    hasher: Arc<dyn KeyHasher>,
    whitelist: Arc<Whitelist>,
    dumps: DumpStore,
    globals: GlobalDumpStore,
    edges: EdgeTable,
    black_hole: Option<AllocatorDump>,
}

impl ProcessMemoryDump {
    pub fn new(args: DumpArgs) -> Self {
        Self {
            args,
            process_token: ProcessToken::current(),
            hasher: Arc::new(Sha1KeyHasher),
            whitelist: Arc::clone(&DEFAULT_WHITELIST),
            dumps: DumpStore::default(),
            globals: GlobalDumpStore::default(),
            edges: EdgeTable::default(),
            black_hole: None,
        }
    }

    /// Use `token` as the process identity of local dump guids.
    pub fn with_process_token(mut self, token: ProcessToken) -> Self {
        self.process_token = token;
        self
    }

    /// Hash local dump names with `hasher`. Graphs that are merged must use
    /// the same hasher.
    pub fn with_key_hasher(mut self, hasher: Arc<dyn KeyHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Redact background dumps against `whitelist` instead of the built-in one.
    pub fn with_whitelist(mut self, whitelist: Arc<Whitelist>) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn args(&self) -> &DumpArgs {
        &self.args
    }

    pub fn is_background(&self) -> bool {
        self.args.is_background()
    }

    pub fn process_token(&self) -> ProcessToken {
        self.process_token
    }

    pub fn whitelist(&self) -> &Arc<Whitelist> {
        &self.whitelist
    }

    /// Guid that a dump named `name` receives in this process, whether or not
    /// it exists yet.
    pub fn dump_id(&self, name: &str) -> Guid {
        self.process_token.dump_guid_with(self.hasher.as_ref(), name)
    }

    pub fn create_allocator_dump(&mut self, name: &str) -> &mut AllocatorDump {
        let guid = self.dump_id(name);
        self.create_allocator_dump_with_guid(name, guid)
    }

    /// Create a dump with an explicit guid.
    ///
    /// Creating the same name twice is a caller bug: debug builds panic,
    /// release builds return the existing dump. A `global/<guid>` name
    /// creates the shared global dump for the guid it spells, not `guid`.
    pub fn create_allocator_dump_with_guid(&mut self, name: &str, guid: Guid) -> &mut AllocatorDump {
        if self.is_redacted(name) {
            trace!(name, "dump name not whitelisted, using black hole");
            return self.black_hole();
        }
        if let Some(global) = shared_global_guid(name) {
            let dump = self.new_global_dump(global, DumpFlags::empty());
            let (dump, inserted) = self.globals.insert_with_flag(dump);
            if !inserted {
                debug_assert!(inserted, "duplicate allocator dump name: {}", dump.name());
                warn!(name = dump.name(), "shared global dump created twice, reusing the existing one");
            }
            return dump;
        }
        let dump = AllocatorDump::new(name, guid, DumpFlags::empty(), self.args.level_of_detail);
        let (dump, inserted) = self.dumps.insert_with_flag(dump);
        if !inserted {
            debug_assert!(inserted, "duplicate allocator dump name: {}", dump.name());
            warn!(name = dump.name(), "allocator dump created twice, reusing the existing one");
        }
        dump
    }

    pub fn get_allocator_dump(&self, name: &str) -> Option<&AllocatorDump> {
        match shared_global_guid(name) {
            Some(guid) => self.globals.by_guid(guid),
            None => self.dumps.by_name(name),
        }
    }

    pub fn get_allocator_dump_mut(&mut self, name: &str) -> Option<&mut AllocatorDump> {
        match shared_global_guid(name) {
            Some(guid) => self.globals.by_guid_mut(guid),
            None => self.dumps.by_name_mut(name),
        }
    }

    pub fn get_or_create_allocator_dump(&mut self, name: &str) -> &mut AllocatorDump {
        if self.is_redacted(name) {
            return self.black_hole();
        }
        if let Some(guid) = shared_global_guid(name) {
            let dump = self.new_global_dump(guid, DumpFlags::empty());
            return self.globals.insert_with_flag(dump).0;
        }
        let dump = AllocatorDump::new(
            name,
            self.dump_id(name),
            DumpFlags::empty(),
            self.args.level_of_detail,
        );
        self.dumps.insert_with_flag(dump).0
    }

    /// Create the global dump for `guid`, or upgrade an existing weak one.
    pub fn create_shared_global_allocator_dump(&mut self, guid: Guid) -> &mut AllocatorDump {
        let dump = self.new_global_dump(guid, DumpFlags::empty());
        let (dump, _) = self.globals.insert_with_flag(dump);
        dump.clear_flags(DumpFlags::WEAK);
        dump
    }

    /// Create a weak global dump for `guid`. An existing dump is returned
    /// unchanged.
    pub fn create_weak_shared_global_allocator_dump(&mut self, guid: Guid) -> &mut AllocatorDump {
        let dump = self.new_global_dump(guid, DumpFlags::WEAK);
        self.globals.insert_with_flag(dump).0
    }

    pub fn get_shared_global_allocator_dump(&self, guid: Guid) -> Option<&AllocatorDump> {
        self.globals.by_guid(guid)
    }

    pub fn get_shared_global_allocator_dump_mut(&mut self, guid: Guid) -> Option<&mut AllocatorDump> {
        self.globals.by_guid_mut(guid)
    }

    /// Record that `source` is owned by `target`. Always takes effect; the
    /// importance never drops below a previously recorded one.
    pub fn add_ownership_edge(&mut self, source: Guid, target: Guid, importance: u32) {
        let edge = self
            .edges
            .claim(source, OwnershipEdge::hard(target, importance));
        trace!(%source, target = %edge.target, importance = edge.importance, "ownership edge");
    }

    /// Like [`add_ownership_edge`](Self::add_ownership_edge), but the edge
    /// stays replaceable, and the call does nothing if `source` already has a
    /// hard edge.
    pub fn add_overridable_ownership_edge(&mut self, source: Guid, target: Guid, importance: u32) {
        let edge = self
            .edges
            .claim(source, OwnershipEdge::overridable(target, importance));
        trace!(
            %source,
            target = %edge.target,
            importance = edge.importance,
            overridable = edge.overridable,
            "overridable ownership edge"
        );
    }

    pub fn edge(&self, source: Guid) -> Option<&OwnershipEdge> {
        self.edges.get(source)
    }

    /// Account `source` as a suballocation of `parent_name` through an
    /// anonymous child dump `<parent_name>/__<source>`.
    ///
    /// In background mode nothing is recorded unless `parent_name` itself is
    /// whitelisted.
    pub fn add_suballocation(&mut self, source: Guid, parent_name: &str) {
        if self.is_redacted(parent_name) {
            trace!(parent = parent_name, "suballocation dropped in background mode");
            return;
        }
        let child_name = format!("{parent_name}/__{source}");
        let child = AllocatorDump::new(
            child_name.as_str(),
            self.dump_id(&child_name),
            DumpFlags::empty(),
            self.args.level_of_detail,
        );
        let target = self.dumps.insert_with_flag(child).0.guid();
        self.add_ownership_edge(source, target, 0);
    }

    /// Attribute `client` to the shared memory region `region`.
    ///
    /// The client is hard-owned by this process's dump of the region; that
    /// dump is softly owned by the region's global dump, unless someone has
    /// already claimed it with a hard edge.
    pub fn create_shared_memory_ownership_edge(&mut self, client: Guid, region: RegionId, importance: u32) {
        let local = self.dump_id(&SharedMemoryTracker::dump_name(region));
        let global = SharedMemoryTracker::global_dump_guid(region);
        self.add_ownership_edge(client, local, importance);
        self.add_overridable_ownership_edge(local, global, 0);
    }

    /// Move every dump, global dump and edge of `other` into `self`.
    /// `other` is left empty and can be reused.
    pub fn take_all_dumps_from(&mut self, other: &mut ProcessMemoryDump) {
        let dumps = other.dumps.take_all();
        let globals = other.globals.take_all();
        let edges = other.edges.take_all();
        other.black_hole = None;
        debug!(
            dumps = dumps.len(),
            globals = globals.len(),
            edges = edges.len(),
            "merging process memory dump"
        );

        for dump in dumps {
            let (dump, inserted) = self.dumps.insert_with_flag(dump);
            if !inserted {
                debug_assert!(inserted, "duplicate allocator dump name: {}", dump.name());
                warn!(name = dump.name(), "dump exists on both sides of a merge, keeping ours");
            }
        }
        for dump in globals {
            self.globals.merge(dump);
        }
        for (source, edge) in edges {
            self.edges.claim(source, edge);
        }
    }

    /// Reset to the freshly constructed state.
    pub fn clear(&mut self) {
        self.dumps.clear();
        self.globals.clear();
        self.edges.clear();
        self.black_hole = None;
    }

    pub fn allocator_dumps(&self) -> impl Iterator<Item = &AllocatorDump> {
        self.dumps.iter()
    }

    pub fn shared_global_dumps(&self) -> impl Iterator<Item = &AllocatorDump> {
        self.globals.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = (Guid, &OwnershipEdge)> {
        self.edges.iter()
    }

    pub fn num_allocator_dumps(&self) -> usize {
        self.dumps.len()
    }

    pub fn num_shared_global_dumps(&self) -> usize {
        self.globals.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Guid of the sentinel returned for redacted dumps.
    pub fn black_hole_guid(&self) -> Guid {
        self.dump_id(BLACK_HOLE_DUMP_NAME)
    }

    pub fn snapshot(&self) -> DumpSnapshot {
        DumpSnapshot::from_dump(self)
    }

    fn is_redacted(&self, name: &str) -> bool {
        self.args.is_background() && !self.whitelist.is_dump_name_whitelisted(name)
    }

    fn black_hole(&mut self) -> &mut AllocatorDump {
        let guid = self.black_hole_guid();
        let level = self.args.level_of_detail;
        self.black_hole.get_or_insert_with(|| {
            AllocatorDump::new(BLACK_HOLE_DUMP_NAME, guid, DumpFlags::empty(), level)
        })
    }

    fn new_global_dump(&self, guid: Guid, flags: DumpFlags) -> AllocatorDump {
        AllocatorDump::new(
            format!("{GLOBAL_DUMP_PREFIX}{guid}"),
            guid,
            flags,
            self.args.level_of_detail,
        )
    }
}

/// Guid spelled by `name` if it is the canonical name of a shared global dump.
fn shared_global_guid(name: &str) -> Option<Guid> {
    let hex = name.strip_prefix(GLOBAL_DUMP_PREFIX)?;
    let guid: Guid = hex.parse().ok()?;
    (guid.to_string() == hex).then_some(guid)
}
