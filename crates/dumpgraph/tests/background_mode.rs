#![forbid(unsafe_code)]

use config::LevelOfDetail;
use dumpgraph::{
    BLACK_HOLE_DUMP_NAME, DumpArgs, DumpProvider, Error, NAME_SIZE, ProcessMemoryDump, Units,
    invoke_providers,
};

struct NetProvider;

impl DumpProvider for NetProvider {
    fn name(&self) -> &str {
        "URLRequestContext"
    }

    fn on_memory_dump(&self, _args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
        for name in [
            "net/http_network_session_0x123",
            "net/http_network_session/0x123",
            "net/url_request_context/app_request/0x123/cookie_monster",
            "net/url_request_context/app_request/0x123/https://example.com",
        ] {
            pmd.create_allocator_dump(name)
                .add_scalar(NAME_SIZE, Units::Bytes, 64);
        }
        let session = pmd.dump_id("net/http_network_session_0x123");
        pmd.add_suballocation(session, "net/http_network_session/0x123");
        pmd.add_suballocation(session, "net/url_request_context/app_request/0x123/cookie_monster");
        Ok(())
    }
}

struct ExpensiveProvider;

impl DumpProvider for ExpensiveProvider {
    fn name(&self) -> &str {
        "HeapProfiler"
    }

    fn on_memory_dump(&self, _args: &DumpArgs, pmd: &mut ProcessMemoryDump) -> Result<(), Error> {
        pmd.create_allocator_dump("malloc");
        Ok(())
    }
}

#[test]
fn background_pass_redacts_names_and_providers() {
    let mut pmd = ProcessMemoryDump::new(DumpArgs::new(LevelOfDetail::Background));
    let providers: [&dyn DumpProvider; 2] = [&NetProvider, &ExpensiveProvider];
    let report = invoke_providers(providers, &mut pmd);

    assert_eq!(report.invoked, vec!["URLRequestContext"]);
    assert_eq!(report.skipped, vec!["HeapProfiler"]);

    let snapshot = pmd.snapshot();
    let names: Vec<_> = snapshot.dumps.iter().map(|n| n.name.as_str()).collect();
    let cookie_child = format!(
        "net/url_request_context/app_request/0x123/cookie_monster/__{}",
        pmd.dump_id("net/http_network_session_0x123")
    );
    assert_eq!(
        names,
        [
            "net/http_network_session_0x123",
            "net/url_request_context/app_request/0x123/cookie_monster",
            cookie_child.as_str(),
        ]
    );
    assert!(snapshot.dump(BLACK_HOLE_DUMP_NAME).is_none());
    assert_eq!(snapshot.edges.len(), 1);
}

#[test]
fn detailed_pass_keeps_everything() {
    let mut pmd = ProcessMemoryDump::new(DumpArgs::new(LevelOfDetail::Detailed));
    let providers: [&dyn DumpProvider; 2] = [&NetProvider, &ExpensiveProvider];
    let report = invoke_providers(providers, &mut pmd);

    assert!(report.skipped.is_empty());
    // 4 named dumps, 2 suballocation children, malloc
    assert_eq!(pmd.num_allocator_dumps(), 7);
    // both suballocations share one source, the second retargets it
    assert_eq!(pmd.num_edges(), 1);
}
