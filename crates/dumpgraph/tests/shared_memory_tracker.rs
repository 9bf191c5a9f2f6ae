#![forbid(unsafe_code)]

use dumpgraph::{
    DumpArgs, DumpProvider, MappedRegion, NoResidentCounter, OwnershipEdge, ProcessMemoryDump,
    ProcessToken, RegionId, SharedMemoryTracker,
};

fn process_dump(token: u64, region: RegionId, client: &str) -> ProcessMemoryDump {
    let tracker = SharedMemoryTracker::with_resident_counter(Box::new(NoResidentCounter));
    tracker.increment_memory_usage(MappedRegion::new(region, 0x7000_0000 + token * 0x1000, 65536));

    let mut pmd = ProcessMemoryDump::new(DumpArgs::default()).with_process_token(ProcessToken::new(token));
    let client = pmd.create_allocator_dump(client).guid();
    pmd.create_shared_memory_ownership_edge(client, region, 1);
    tracker.on_memory_dump(&DumpArgs::default(), &mut pmd).unwrap();
    pmd
}

#[test]
fn processes_mapping_one_region_converge_on_one_global() {
    let region = RegionId::from_parts(0x1111, 0x2222);
    let browser = process_dump(1, region, "gpu/gl/buffers/share_group_0x1");
    let renderer = process_dump(2, region, "cc/tile_memory/provider_0x2");

    let global = SharedMemoryTracker::global_dump_guid(region);
    let name = SharedMemoryTracker::dump_name(region);

    for pmd in [&browser, &renderer] {
        assert!(pmd.get_shared_global_allocator_dump(global).is_some());
        let local = pmd.get_allocator_dump(&name).unwrap();
        assert_eq!(local.size(), Some(65536));
        assert_eq!(pmd.edge(local.guid()), Some(&OwnershipEdge::overridable(global, 0)));
    }

    let browser_local = browser.get_allocator_dump(&name).unwrap().guid();
    let renderer_local = renderer.get_allocator_dump(&name).unwrap().guid();
    assert_ne!(browser_local, renderer_local);
}

#[test]
fn hard_claim_on_local_dump_sticks() {
    let region = RegionId::new(0x55);
    let mut pmd = process_dump(3, region, "discardable/child_0x3");
    let local = pmd.dump_id(&SharedMemoryTracker::dump_name(region));
    let global = SharedMemoryTracker::global_dump_guid(region);

    pmd.add_ownership_edge(local, global, 4);
    pmd.add_overridable_ownership_edge(local, global, 0);
    assert_eq!(pmd.edge(local), Some(&OwnershipEdge::hard(global, 4)));
}
